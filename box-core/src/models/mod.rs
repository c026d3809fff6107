mod box_specification;
mod cost_breakdown;
mod material_pricing;
mod paper_type;
mod party;
mod product;

pub use box_specification::{BoxSpecification, LayerStack};
pub use cost_breakdown::CostBreakdown;
pub use material_pricing::MaterialPricing;
pub use paper_type::PaperType;
pub use party::{NewParty, Party};
pub use product::Product;
