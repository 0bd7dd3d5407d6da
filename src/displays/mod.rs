//! Satellite display consumers fed by the sync channel.

pub mod kds;
