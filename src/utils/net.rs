//! Local socket checks.

use std::io;
use std::net::{SocketAddr, TcpListener};

/// Try to bind `addr` and release it again.
///
/// The listener is dropped immediately, so the port is free again
/// for the real transport. An `AddrInUse` error means another process
/// holds the port.
pub fn check_bind(addr: SocketAddr) -> io::Result<()> {
    let listener = TcpListener::bind(addr)?;
    drop(listener);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_port_is_in_use() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let err = check_bind(addr).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AddrInUse);
    }

    #[test]
    fn test_released_port_can_be_bound() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        assert!(check_bind(addr).is_ok());
    }
}
