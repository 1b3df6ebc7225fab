use std::error::Error;
use std::net::{SocketAddrV4, UdpSocket};
use std::time::Duration;

use rosc::encoder;
use rosc::OscPacket;

pub struct OscClient {
    socket: UdpSocket,
    target_addr: SocketAddrV4
}

impl OscClient {

    pub fn new(socket: UdpSocket, target_addr: SocketAddrV4) -> OscClient {
        OscClient {
            socket,
            target_addr
        }
    }

    // Non-blocking local socket on an ephemeral port
    pub fn bind(target_addr: SocketAddrV4) -> Result<OscClient, Box<dyn Error>> {
        let socket = UdpSocket::bind("127.0.0.1:0")?;
        socket.set_nonblocking(true)?;
        socket.set_write_timeout(Some(Duration::from_millis(1)))?;
        Ok(OscClient::new(socket, target_addr))
    }

    pub fn send(&mut self, packet: OscPacket) -> Result<(), Box<dyn Error>> {
        let msg_buf = encoder::encode(&packet)
            .map_err(|e| format!("could not encode OSC packet: {:?}", e))?;
        self.socket.send_to(&msg_buf, self.target_addr)?;
        Ok(())
    }
}
