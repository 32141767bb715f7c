use colloquy::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let gateway = Arc::new(OpenAIGateway::from_env()?);
    let client = ChatClient::new(gateway, ClientConfig::default().with_max_tokens(256));
    let mut room = Chatroom::new(client);

    room.add_participant(
        "Alice",
        "You are Alice, a pirate. Keep every reply to two sentences.",
        Some("Introduce yourself to the crew.".to_string()),
        Some(0.9),
    )?;
    room.add_participant(
        "Bob",
        "You are Bob, a cautious ship's accountant. Keep every reply to two sentences.",
        None,
        None,
    )?;

    room.add_host_message("Welcome aboard. Should we sail into the storm tonight?");

    let intro = room.introduce_participant("Alice").await?;
    println!("{}: {}\n", intro.speaker_name(), intro.content());

    for reply in room.prompt_all_participants().await? {
        println!("{}: {}\n", reply.speaker_name(), reply.content());
    }

    println!("--- transcript ---");
    for message in room.conversation_messages(true) {
        println!("{}", message.content);
    }

    Ok(())
}
