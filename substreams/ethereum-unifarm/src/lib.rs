mod abi;
mod entities;
mod mapping;
mod modules;
mod params;
mod pb;
mod store;

substreams_ethereum::init!();
