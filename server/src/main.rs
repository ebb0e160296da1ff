#[tokio::main]
async fn main() {
    if let Err(e) = empathic_chat_lib::run().await {
        eprintln!("empathic-chat: {}", e);
        std::process::exit(1);
    }
}
