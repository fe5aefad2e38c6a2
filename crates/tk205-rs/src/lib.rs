//! # tk205 Representation Specifications
//!
//! Typed object graphs for the ASHRAE 205 representation types:
//!
//! | RS_ID  | Equipment                                  |
//! |--------|--------------------------------------------|
//! | RS0001 | Liquid-cooled chiller                      |
//! | RS0002 | Unitary cooling air-conditioning equipment |
//! | RS0003 | Fan assembly                               |
//! | RS0004 | DX air-conditioning system                 |
//! | RS0005 | Motor                                      |
//! | RS0006 | Electronic motor drive                     |
//! | RS0007 | Mechanical drive                           |
//!
//! Every payload owns `metadata`, `description` and `performance` sections
//! and binds itself through the kernel's field contract. Embedded
//! representations (motor → drive, fan → motor, unitary → fan + DX) are
//! full envelopes whose type is chosen by their own `RS_ID`.
//!
//! Types become loadable once [`register_representations`] has run against
//! a factory, or by starting from [`default_factory`].

pub mod common;
pub mod registry;
pub mod rs0001;
pub mod rs0002;
pub mod rs0003;
pub mod rs0004;
pub mod rs0005;
pub mod rs0006;
pub mod rs0007;

pub use registry::{REPRESENTATIONS, default_factory, register_representations};
pub use rs0001::Rs0001;
pub use rs0002::Rs0002;
pub use rs0003::Rs0003;
pub use rs0004::Rs0004;
pub use rs0005::Rs0005;
pub use rs0006::Rs0006;
pub use rs0007::Rs0007;

use common::Metadata;
use tk205_kernel::{Envelope, Field};

/// A bound ASHRAE 205 document.
pub type Ashrae205 = Envelope;

/// Typed access to a document's payload, one getter per representation type.
///
/// Each getter returns `None` when the payload is missing or is another type.
pub trait Ashrae205Ext {
    fn envelope(&self) -> Option<&Envelope>;

    fn get_rs0001(&self) -> Option<&Rs0001> {
        self.envelope()?.get()
    }

    fn get_rs0002(&self) -> Option<&Rs0002> {
        self.envelope()?.get()
    }

    fn get_rs0003(&self) -> Option<&Rs0003> {
        self.envelope()?.get()
    }

    fn get_rs0004(&self) -> Option<&Rs0004> {
        self.envelope()?.get()
    }

    fn get_rs0005(&self) -> Option<&Rs0005> {
        self.envelope()?.get()
    }

    fn get_rs0006(&self) -> Option<&Rs0006> {
        self.envelope()?.get()
    }

    fn get_rs0007(&self) -> Option<&Rs0007> {
        self.envelope()?.get()
    }

    /// The payload's `metadata` section, whatever the payload type.
    fn metadata(&self) -> Option<&Metadata> {
        let envelope = self.envelope()?;
        let metadata = match envelope.id()? {
            rs0001::RS_ID => &envelope.get::<Rs0001>()?.metadata,
            rs0002::RS_ID => &envelope.get::<Rs0002>()?.metadata,
            rs0003::RS_ID => &envelope.get::<Rs0003>()?.metadata,
            rs0004::RS_ID => &envelope.get::<Rs0004>()?.metadata,
            rs0005::RS_ID => &envelope.get::<Rs0005>()?.metadata,
            rs0006::RS_ID => &envelope.get::<Rs0006>()?.metadata,
            rs0007::RS_ID => &envelope.get::<Rs0007>()?.metadata,
            _ => return None,
        };
        metadata.present()
    }
}

impl Ashrae205Ext for Envelope {
    fn envelope(&self) -> Option<&Envelope> {
        Some(self)
    }
}

/// Embedded representation fields.
impl Ashrae205Ext for Field<Envelope> {
    fn envelope(&self) -> Option<&Envelope> {
        self.present()
    }
}
