use colloquy::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let gateway = Arc::new(OpenAIGateway::from_env()?);
    let client = ChatClient::with_defaults(gateway);

    let answer = client.single_prompt("What is 2 + 2?", &PromptOptions::default()).await?;
    println!("Answer: {}", answer);

    let agent = AgentDescription::new()
        .role("travel agent")
        .task("Suggest one weekend destination in Portugal")
        .format("a single sentence");
    let suggestion = client
        .prompt_agent(&agent, None, &PromptOptions::new().temperature(0.8))
        .await?;
    println!("Suggestion: {}", suggestion);

    let full = client.single_prompt_full("Name a prime number.", &PromptOptions::default()).await?;
    if let Some(usage) = full.usage {
        println!("{}", usage);
    }

    Ok(())
}
