//! Configuration Tree Module
//!
//! The address-book subtree of a device configuration, and its XML form.
//!
//! ## Element Layout
//! ```text
//! <configuration>
//!   <security>
//!     <address-book>
//!       <name/>
//!       <address operation="..."> name, description, ip-prefix </address>*
//!       <address-set operation="...">
//!         name, address-set-name, description, address*, address-set*
//!       </address-set>*
//!     </address-book>
//!   </security>
//! </configuration>
//! ```
//!
//! Empty leaves are never written. The `operation` attribute belongs to the
//! element it is written on and is not inherited by children.

mod model;
mod encode;
pub(crate) mod decode;

pub use model::{Address, AddressBook, AddressSet, Configuration, EditOperation};
pub use encode::encode_configuration;
