use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::TcpListener;

use super::{ConnectionTable, Inbound};

/// Start the TCP listener and accept client connections.
pub async fn run(
    inbound: Inbound,
    connections: Arc<ConnectionTable>,
    bind_addr: &str,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);

    let next_conn_id = AtomicU64::new(1);
    loop {
        let (stream, addr) = listener.accept().await?;
        let conn_id = next_conn_id.fetch_add(1, Ordering::Relaxed);
        tracing::info!("Connection {} from {}", conn_id, addr);

        let inbound = inbound.clone();
        let outgoing = connections.register(conn_id);
        let connections = Arc::clone(&connections);
        tokio::spawn(async move {
            if let Err(e) =
                super::connection::handle(stream, addr, conn_id, inbound, outgoing).await
            {
                tracing::warn!("Connection from {} closed: {:#}", addr, e);
            }
            connections.remove(conn_id);
        });
    }
}
