mod context;
pub mod expression;

pub use context::{Context, ParameterReader};
pub use expression::{ExpressionEvaluator, ItemExpressionEvaluator};
