//! IPv4/UDP framing for RTP frames
//!
//! Packets are raw IPv4 datagrams with no link-layer header, matching the
//! capture file's `LINKTYPE_RAW` link type.

use std::net::SocketAddrV4;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MediaError, Result};

/// IPv4 header length without options
pub const IPV4_HEADER_SIZE: usize = 20;

/// UDP header length
pub const UDP_HEADER_SIZE: usize = 8;

const IPPROTO_UDP: u8 = 17;

/// Wraps RTP frames into UDP datagrams between two fixed endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketFramer {
    source: SocketAddrV4,
    destination: SocketAddrV4,
    ttl: u8,
}

impl PacketFramer {
    pub fn new(source: SocketAddrV4, destination: SocketAddrV4, ttl: u8) -> Self {
        Self {
            source,
            destination,
            ttl,
        }
    }

    pub fn source(&self) -> SocketAddrV4 {
        self.source
    }

    pub fn destination(&self) -> SocketAddrV4 {
        self.destination
    }

    /// Build one IPv4/UDP packet carrying `payload`
    ///
    /// `identification` fills the IPv4 ID field so consecutive packets stay
    /// distinguishable in analyzers.
    pub fn frame(&self, identification: u16, payload: &[u8]) -> Result<Bytes> {
        let total_len = IPV4_HEADER_SIZE + UDP_HEADER_SIZE + payload.len();
        if total_len > u16::MAX as usize {
            return Err(MediaError::PacketTooLarge { size: total_len });
        }
        let udp_len = (UDP_HEADER_SIZE + payload.len()) as u16;

        let mut buf = BytesMut::with_capacity(total_len);

        // IPv4 header (RFC 791)
        buf.put_u8(0x45); // version 4, IHL 5
        buf.put_u8(0); // DSCP/ECN
        buf.put_u16(total_len as u16);
        buf.put_u16(identification);
        buf.put_u16(0); // flags, fragment offset
        buf.put_u8(self.ttl);
        buf.put_u8(IPPROTO_UDP);
        buf.put_u16(0); // checksum, patched below
        buf.put_slice(&self.source.ip().octets());
        buf.put_slice(&self.destination.ip().octets());
        let ip_checksum = internet_checksum(&buf[..IPV4_HEADER_SIZE], 0);
        buf[10..12].copy_from_slice(&ip_checksum.to_be_bytes());

        // UDP header (RFC 768)
        buf.put_u16(self.source.port());
        buf.put_u16(self.destination.port());
        buf.put_u16(udp_len);
        buf.put_u16(0);
        buf.put_slice(payload);

        let udp_checksum = match internet_checksum(&buf[IPV4_HEADER_SIZE..], self.pseudo_header_sum(udp_len)) {
            0 => 0xFFFF,
            sum => sum,
        };
        buf[IPV4_HEADER_SIZE + 6..IPV4_HEADER_SIZE + 8].copy_from_slice(&udp_checksum.to_be_bytes());

        Ok(buf.freeze())
    }

    fn pseudo_header_sum(&self, udp_len: u16) -> u32 {
        let src = self.source.ip().octets();
        let dst = self.destination.ip().octets();
        [
            u16::from_be_bytes([src[0], src[1]]),
            u16::from_be_bytes([src[2], src[3]]),
            u16::from_be_bytes([dst[0], dst[1]]),
            u16::from_be_bytes([dst[2], dst[3]]),
            IPPROTO_UDP as u16,
            udp_len,
        ]
        .iter()
        .map(|&word| word as u32)
        .sum()
    }
}

/// One's-complement sum of 16-bit words, folded and inverted
pub fn internet_checksum(data: &[u8], initial: u32) -> u16 {
    let mut sum = initial;
    let mut words = data.chunks_exact(2);
    for word in &mut words {
        sum += u16::from_be_bytes([word[0], word[1]]) as u32;
    }
    if let [last] = words.remainder() {
        sum += (*last as u32) << 8;
    }
    while sum > 0xFFFF {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    !(sum as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn framer() -> PacketFramer {
        PacketFramer::new(
            SocketAddrV4::new(Ipv4Addr::new(192, 168, 0, 1), 8000),
            SocketAddrV4::new(Ipv4Addr::new(192, 168, 0, 2), 9000),
            32,
        )
    }

    #[test]
    fn test_header_layout() {
        let packet = framer().frame(7, &[0xAA; 12]).unwrap();
        assert_eq!(packet.len(), 40);

        assert_eq!(packet[0], 0x45);
        assert_eq!(u16::from_be_bytes([packet[2], packet[3]]), 40);
        assert_eq!(u16::from_be_bytes([packet[4], packet[5]]), 7);
        assert_eq!(packet[8], 32);
        assert_eq!(packet[9], 17);
        assert_eq!(&packet[12..16], &[192, 168, 0, 1]);
        assert_eq!(&packet[16..20], &[192, 168, 0, 2]);

        assert_eq!(u16::from_be_bytes([packet[20], packet[21]]), 8000);
        assert_eq!(u16::from_be_bytes([packet[22], packet[23]]), 9000);
        assert_eq!(u16::from_be_bytes([packet[24], packet[25]]), 20);
        assert_eq!(&packet[28..], &[0xAA; 12]);
    }

    #[test]
    fn test_checksums_verify() {
        let f = framer();
        for payload_len in [0usize, 1, 13, 172] {
            let payload: Vec<u8> = (0..payload_len).map(|i| i as u8).collect();
            let packet = f.frame(1, &payload).unwrap();

            // A header with a correct checksum sums to zero
            assert_eq!(internet_checksum(&packet[..IPV4_HEADER_SIZE], 0), 0);

            let udp_len = (UDP_HEADER_SIZE + payload_len) as u16;
            assert_eq!(internet_checksum(&packet[IPV4_HEADER_SIZE..], f.pseudo_header_sum(udp_len)), 0);
        }
    }

    #[test]
    fn test_known_ip_checksum() {
        // Worked example from RFC 1071 discussions
        let header = [
            0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xc0, 0xa8, 0x00, 0x01,
            0xc0, 0xa8, 0x00, 0xc7,
        ];
        assert_eq!(internet_checksum(&header, 0), 0xb861);
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = vec![0u8; 65535];
        assert!(matches!(framer().frame(0, &payload), Err(MediaError::PacketTooLarge { .. })));
    }
}
