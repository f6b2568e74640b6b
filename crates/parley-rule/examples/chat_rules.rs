use parley_rule::{Handler, HandlerSlot, MemoryRuleRepository, RuleManager};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("PARLEY - rule lifecycle demo\n");

    let repo = MemoryRuleRepository::new();
    let mut manager = RuleManager::new(repo);

    println!("{}", "=".repeat(60));
    println!("Step 1: load rules from the store");
    println!("{}", "=".repeat(60));

    let loaded = manager.initialize().await?;
    println!("store had existing rules: {loaded}\n");

    println!("{}", "=".repeat(60));
    println!("Step 2: register rules");
    println!("{}", "=".repeat(60));

    let greeting_id = manager
        .add_rule(
            "hello",
            json!({
                "text": "Hi! How can I help you today?",
                "quick_replies": ["order status", "talk to a human"]
            }),
        )
        .await?;
    println!("rule registered: {greeting_id}");

    let order_id = manager
        .add_rule("order status", json!({"text": "Looking up your order..."}))
        .await?;
    println!("rule registered: {order_id}\n");

    println!("{}", "=".repeat(60));
    println!("Step 3: attach a follow-up handler");
    println!("{}", "=".repeat(60));

    manager
        .add_then_handler(
            order_id,
            Handler::Notify {
                channel: "support".to_string(),
                message: "customer asked about an order".to_string(),
            },
        )
        .await?;
    println!("handler attached to rule {order_id}\n");

    println!("{}", "=".repeat(60));
    println!("Step 4: look up by id");
    println!("{}", "=".repeat(60));

    if let Some(rule) = manager.get_by_id(order_id)? {
        println!("request:  {}", rule.request);
        println!("response: {}", rule.response);
        if let Some(HandlerSlot::Decoded(handler)) = rule.then_handler {
            println!("handler:  {handler:?}");
        }
    }

    println!("\ntotal rules in memory: {}", manager.get_all().len());

    Ok(())
}
