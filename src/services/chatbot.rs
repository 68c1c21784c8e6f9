use crate::config::ProxyConfig;
use crate::message::{Message, Role};
use crate::services::gemini::{Content, GenerateContentRequest, GenerationConfig};

pub const PROVIDER_USER_ROLE: &str = "user";
pub const PROVIDER_MODEL_ROLE: &str = "model";

pub fn provider_role(role: Role) -> &'static str {
    match role {
        Role::Assistant => PROVIDER_MODEL_ROLE,
        Role::User => PROVIDER_USER_ROLE,
    }
}

/// Why a conversation cannot be forwarded.
pub fn check_conversation(messages: &[Message]) -> Result<(), &'static str> {
    match messages.last() {
        None => Err("Conversation cannot be empty"),
        Some(last) if last.content.trim().is_empty() => Err("Message cannot be empty"),
        Some(_) => Ok(()),
    }
}

pub fn to_contents(messages: &[Message]) -> Vec<Content> {
    messages
        .iter()
        .map(|m| Content::text(Some(provider_role(m.role)), m.content.clone()))
        .collect()
}

pub fn build_request(messages: &[Message], config: &ProxyConfig) -> GenerateContentRequest {
    let system_instruction = Some(config.system_prompt.trim())
        .filter(|p| !p.is_empty())
        .map(|p| Content::text(None, p));

    GenerateContentRequest {
        contents: to_contents(messages),
        system_instruction,
        generation_config: GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        },
    }
}
