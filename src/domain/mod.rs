// Domain layer - models, rules and errors for the transformation plan

pub mod errors;
pub mod model;
pub mod rules;
