pub mod aggregate;

pub use aggregate::{
    AdjustmentType, PriceQuoteParams, PricingRuleRequest, PricingRuleResponse, RuleType,
};
