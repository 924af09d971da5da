#![allow(clippy::all)]

pub mod unifarm_v18;
