// Domain layer: the geo record, reference tables, and the ports the resolvers talk through.

pub mod model;
pub mod ports;
pub mod reference;
