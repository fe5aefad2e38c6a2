//! Startup registration of the representation types.
//!
//! `REPRESENTATIONS` is the single authority for which types exist. A new
//! type is added by appending one row; nothing else dispatches on `RS_ID`.

use crate::{rs0001, rs0002, rs0003, rs0004, rs0005, rs0006, rs0007};
use tk205_kernel::{Representation, RsFactory};

/// Registered representation types, in identifier order.
pub const REPRESENTATIONS: &[(&str, fn() -> Box<dyn Representation>)] = &[
    (rs0001::RS_ID, || Box::new(rs0001::Rs0001::default())),
    (rs0002::RS_ID, || Box::new(rs0002::Rs0002::default())),
    (rs0003::RS_ID, || Box::new(rs0003::Rs0003::default())),
    (rs0004::RS_ID, || Box::new(rs0004::Rs0004::default())),
    (rs0005::RS_ID, || Box::new(rs0005::Rs0005::default())),
    (rs0006::RS_ID, || Box::new(rs0006::Rs0006::default())),
    (rs0007::RS_ID, || Box::new(rs0007::Rs0007::default())),
];

/// Register every row of `REPRESENTATIONS` with `factory`.
pub fn register_representations(factory: &mut RsFactory) {
    for (rs_id, constructor) in REPRESENTATIONS {
        factory.register(*rs_id, *constructor);
    }
}

/// A factory holding every known representation type.
pub fn default_factory() -> RsFactory {
    let mut factory = RsFactory::new();
    register_representations(&mut factory);
    factory
}
