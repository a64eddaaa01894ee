//! Integration tests for the liveness probe over real sockets.

use std::net::IpAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use driftwatch::lifecycle::Shutdown;
use driftwatch::probe::ProbeServer;

async fn start_probe() -> (std::net::SocketAddr, Shutdown, tokio::task::JoinHandle<()>) {
    let ip: IpAddr = "127.0.0.1".parse().unwrap();
    let server = ProbeServer::bind(ip, 0).await.unwrap();
    let addr = server.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(shutdown.subscribe()));

    (addr, shutdown, handle)
}

#[tokio::test]
async fn test_connect_and_close_returns_to_accepting() {
    let (addr, shutdown, handle) = start_probe().await;

    // A health checker that connects and immediately hangs up.
    let stream = TcpStream::connect(addr).await.unwrap();
    drop(stream);

    // The listener must still accept after the hang-up.
    let mut second = TcpStream::connect(addr).await.unwrap();
    second.write_all(b"ping").await.unwrap();
    second.shutdown().await.unwrap();

    shutdown.trigger();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_slow_peer_does_not_block_new_connections() {
    let (addr, shutdown, handle) = start_probe().await;

    // This peer stays connected without sending anything.
    let mut slow = TcpStream::connect(addr).await.unwrap();

    // Meanwhile other peers connect, talk, and leave.
    for _ in 0..3 {
        let mut peer = TcpStream::connect(addr).await.unwrap();
        peer.write_all(b"are you alive").await.unwrap();
        peer.shutdown().await.unwrap();
    }

    // The slow peer's connection is still usable afterwards.
    slow.write_all(b"still here").await.unwrap();
    slow.shutdown().await.unwrap();

    shutdown.trigger();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_payload_is_discarded_not_echoed() {
    let (addr, shutdown, handle) = start_probe().await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    stream.shutdown().await.unwrap();

    // The server never writes; reading yields EOF once it drops the
    // connection after draining.
    let mut buf = [0u8; 64];
    let n = tokio::time::timeout(Duration::from_secs(5), async {
        use tokio::io::AsyncReadExt;
        stream.read(&mut buf).await.unwrap()
    })
    .await
    .unwrap();
    assert_eq!(n, 0);

    shutdown.trigger();
    handle.await.unwrap();
}
