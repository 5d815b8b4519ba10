//! This crate implements a small content-addressable object database
//! laid out the way git stores loose objects and references.
//!
//! Objects (blobs, trees, commits, and tags) are described in the
//! [`object`] module. Storing them, resolving references, and walking
//! commit history is done through a [`repo::Repository`].

#![deny(warnings)]

pub mod object;
pub mod repo;
