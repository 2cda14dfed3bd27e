//! A small, file-backed database of person records, written in Rust.
//!
//! Records live in memory in an AVL tree keyed by `(last name, first name)`. Keys compare byte by
//! byte and case-sensitively, see [`key::compare`]. The database file is plain text with one
//! record per line, and is rewritten as a whole, in key order, on every save.
//!
//! # Open Database
//!
//! ```no_run
//! use persondb::{Options, PersonDB, Result};
//! # fn try_main() -> Result<()> {
//!
//! let path = "target/people.txt";
//!
//! // The simplest way to open with default `Options`, the file must exist:
//! let db = PersonDB::open(path)?;
//!
//! // Open with `Options`, starting empty if the file does not exist yet:
//! let db = Options::new().create_if_missing(true).open(path)?;
//! println!("{:?}", db.load_report());
//! # Ok(())
//! # }
//! # fn main() { try_main().unwrap(); }
//! ```
//!
//! # Get, Insert, Update, Delete
//!
//! ```
//! # use std::io::Cursor;
//! # use persondb::{Field, PersonDB, Result};
//! # fn try_main() -> Result<()> {
//! let db = PersonDB::in_memory();
//! db.load(Cursor::new(
//!     "Smith John TX 75001 1980 1 1 pw 100.5 123-45-6789\n\
//!      Doe Jane CA 90210 1975 6 15 pw 20 987-65-4321\n",
//! ))?;
//!
//! // Lookups take the first name, then the last name.
//! assert_eq!(db.get("John", "Smith").unwrap().state, "TX");
//! assert!(db.get("john", "Smith").is_none());
//!
//! // Inserting an existing key keeps the existing record.
//! let mut twin = db.get("John", "Smith").unwrap();
//! twin.state = "NY".to_owned();
//! assert!(!db.insert(twin)?);
//!
//! // Non-key fields are updated in place.
//! assert!(db.update("John", "Smith", Field::ZipCode, "10001")?);
//!
//! assert_eq!(db.oldest().unwrap().last_name, "Doe");
//!
//! assert!(db.delete("John", "Smith").is_some());
//! assert!(db.get("John", "Smith").is_none());
//! # Ok(())
//! # }
//! # fn main() { try_main().unwrap(); }
//! ```
//!
//! # Index
//!
//! [`AvlTree`] can also be used on its own, or through [`PersonDB::view`] and
//! [`PersonDB::modify`]:
//!
//! ```
//! use persondb::{codec, AvlTree};
//!
//! let mut tree = AvlTree::new();
//! for line in [
//!     "A a S 1 2000 1 1 p 0 s",
//!     "B b S 1 2000 1 1 p 0 s",
//!     "C c S 1 2000 1 1 p 0 s",
//! ] {
//!     tree.insert(codec::decode(line).unwrap());
//! }
//!
//! assert_eq!(tree.root().unwrap().last_name, "B");
//! assert_eq!(tree.height(), 2);
//! assert!(tree.check().balanced);
//! ```
//!
//! ## Attention
//!
//! ❗️ The whole index sits behind a single lock. Holding the [`Debugger`] or running a closure in
//! [`PersonDB::view`] blocks every mutation until it returns, so don't call mutating methods of
//! the same database from inside.
//!

mod avl;
pub mod codec;
mod db;
mod error;
pub mod key;
mod person;

pub use crate::{
    avl::{AvlTree, BalanceReport, Iter},
    db::{Debugger, LoadReport, Options, PersonDB},
    error::{Error, ErrorCode, Result},
    key::Key,
    person::{Field, FieldParseError, Person},
};
