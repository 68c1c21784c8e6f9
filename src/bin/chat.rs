use clap::Parser;
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use launchpath::client::{ChatSession, Identity, LocalIdentityProvider, ProxyTransport};
use launchpath::message::{Message, Role};

/// Terminal front-end for the LaunchPath chat proxy
#[derive(Parser, Debug)]
#[command(name = "launchpath-chat")]
#[command(about = "Chat with LaunchPath AI from the terminal", long_about = None)]
struct Args {
    /// Chat proxy endpoint
    #[arg(long, default_value = "http://localhost:3000/chat")]
    proxy_url: String,

    /// Sign in with this email
    #[arg(long)]
    email: Option<String>,

    /// Skip sign-in and chat as a guest
    #[arg(long)]
    guest: bool,
}

fn render(message: &Message) {
    match message.role {
        Role::User => println!("{} {}", "you ›".bold(), message.content),
        Role::Assistant => println!("{} {}", "LaunchPath ›".cyan().bold(), message.content),
    }
}

fn render_header(session: &ChatSession) {
    match session.identity() {
        Identity::Unauthenticated => println!(
            "{} Not signed in. Type {} to continue as a guest, or restart with {}.",
            "✦".yellow(),
            "/guest".bright_cyan(),
            "--email".bright_cyan()
        ),
        Identity::Guest { .. } => println!("{} Chatting as guest", "✦".yellow()),
        Identity::Authenticated(_) => println!(
            "{} Signed in as {}",
            "✦".yellow(),
            session.display_email().unwrap_or_default().bright_cyan()
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let provider = match args.email {
        Some(email) => LocalIdentityProvider::with_email(email),
        None => LocalIdentityProvider::default(),
    };
    let transport = ProxyTransport::new(args.proxy_url);

    let mut session = ChatSession::new();
    session.mount(&provider).await;
    if args.guest && !session.identity().is_signed_in() {
        session.continue_as_guest();
    }

    println!("{}", "✦ LaunchPath".bold());
    render_header(&session);
    println!("Ask LaunchPath anything... ({} to leave)", "/quit".bright_cyan());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/logout" => {
                if let Err(err) = session.logout(&provider).await {
                    eprintln!("{} {}", "!".red().bold(), err);
                }
                render_header(&session);
                continue;
            }
            "/guest" => {
                session.continue_as_guest();
                render_header(&session);
                continue;
            }
            _ => {}
        }

        session.set_input(line);
        if !session.can_submit() {
            if !session.identity().is_signed_in() {
                render_header(&session);
            }
            continue;
        }

        println!("{}", "Thinking...".dimmed());
        session.submit(&transport).await;

        // The user's own line is already on screen.
        if let Some(reply) = session.transcript().last() {
            render(reply);
        }
    }

    Ok(())
}
