//! Standalone vehicle inventory for manual runs against the CLI.

use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("vehicle inventory on http://{addr}");
    println!("  GET|POST            /vehicles");
    println!("  GET|PUT|DELETE      /vehicles/{{id}}");
    println!("try: VEHICLES_API_URL=http://{addr} vehicle-manager list");
    mock_server::run(listener).await
}
