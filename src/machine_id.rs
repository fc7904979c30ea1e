//! Machine identity resolution.
//!
//! The default strategy takes the lower 16 bits of the first private IPv4
//! address found on a non-loopback interface. Callers may replace it with any
//! [`MachineIdResolver`], including a plain closure.

use std::net::{IpAddr, Ipv4Addr};

use log::debug;

use crate::error::{IdGenError, Result};

pub trait MachineIdResolver: Send + Sync {
    fn resolve(&self) -> Result<u16>;
}

impl<F> MachineIdResolver for F
where
    F: Fn() -> Result<u16> + Send + Sync,
{
    fn resolve(&self) -> Result<u16> {
        self()
    }
}

/// Resolves from the host's private network address.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivateIpResolver;

impl MachineIdResolver for PrivateIpResolver {
    fn resolve(&self) -> Result<u16> {
        let addrs = interface_addrs()?;
        let machine_id = lower_16_bits_private_ip(&addrs)?;
        debug!("Resolved machine id {} from {} interface addresses", machine_id, addrs.len());
        Ok(machine_id)
    }
}

/// A fixed machine id, e.g. from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticMachineId(pub u16);

impl MachineIdResolver for StaticMachineId {
    fn resolve(&self) -> Result<u16> {
        Ok(self.0)
    }
}

/// First non-loopback RFC 1918 IPv4 address in `addrs`.
pub fn private_ipv4(addrs: &[IpAddr]) -> Option<Ipv4Addr> {
    addrs.iter().find_map(|addr| match addr {
        IpAddr::V4(v4) if !v4.is_loopback() && v4.is_private() => Some(*v4),
        _ => None,
    })
}

/// `(octet3 << 8) | octet4` of the first private IPv4 address in `addrs`.
pub fn lower_16_bits_private_ip(addrs: &[IpAddr]) -> Result<u16> {
    let ip = private_ipv4(addrs).ok_or(IdGenError::NoPrivateAddress)?;
    let octets = ip.octets();
    Ok(u16::from(octets[2]) << 8 | u16::from(octets[3]))
}

/// Addresses of all local network interfaces.
#[cfg(unix)]
pub fn interface_addrs() -> Result<Vec<IpAddr>> {
    use nix::ifaddrs::getifaddrs;
    use std::net::SocketAddrV4;

    let ifaddrs = getifaddrs().map_err(|e| IdGenError::InterfaceEnumeration(e.to_string()))?;
    Ok(ifaddrs
        .filter_map(|ifa| ifa.address)
        .filter_map(|addr| {
            addr.as_sockaddr_in()
                .map(|sin| IpAddr::V4(*SocketAddrV4::from(*sin).ip()))
        })
        .collect())
}

#[cfg(not(unix))]
pub fn interface_addrs() -> Result<Vec<IpAddr>> {
    Err(IdGenError::InterfaceEnumeration(
        "interface enumeration is not supported on this platform".to_string(),
    ))
}
