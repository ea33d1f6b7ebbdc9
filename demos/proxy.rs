//! Run the proxy in front of a local conversation endpoint and talk to it with curl:
//!
//! ```sh
//! cargo run --example proxy --features axum
//! curl -N -X POST http://localhost:3000/api/chat -d '{"message":"hi"}'
//! ```

use unsse::{Upstream, proxy};

#[tokio::main]
async fn main() {
    let upstream = Upstream::new("http://localhost:8080/conversation");
    let app = proxy::router(upstream.clone());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!(
        "proxying http://{}/api/chat -> {}",
        listener.local_addr().unwrap(),
        upstream.url()
    );
    axum::serve(listener, app).await.unwrap();
}
