//! IP address sets as CIDR networks, explicit ranges and sparse lists, with
//! containment queries across IPv4 and IPv6.
//!
//! ```
//! use std::str::FromStr;
//! use iprange::{Cidr, IpList, IpRange, Scope};
//!
//! let scope = Scope::new();
//! let home = Cidr::from_str("192.168.1.0/24").unwrap();
//! let dhcp = IpRange::from_str("192.168.1.1-192.168.1.100").unwrap();
//! assert_eq!(home.contains_list(&scope, &IpList::from(dhcp)), Ok(true));
//! assert_eq!(home.next_network().unwrap().to_string(), "192.168.2.0/24");
//! ```

pub mod bound;
pub mod cidr;
pub mod contiguous;
pub mod error;
pub mod feed;
pub mod list;
pub mod range;
pub mod scope;
pub mod set;

pub use crate::bound::Bound;
pub use crate::cidr::Cidr;
pub use crate::contiguous::{Addresses, Contiguous};
pub use crate::error::{Error, Result};
pub use crate::feed::AddressFeed;
pub use crate::list::IpList;
pub use crate::range::IpRange;
pub use crate::scope::{Scope, ScopeGuard};
pub use crate::set::IpSet;
