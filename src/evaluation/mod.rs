//! evaluation — realized volatility and forecast accuracy.
//!
//! [`realized`] computes the rolling realized-volatility path and the
//! percent anchor; [`evaluator`] scores one-day-ahead forecast records
//! against that anchor with MAE and RMSE per model.

pub mod errors;
pub mod evaluator;
pub mod realized;

pub use self::errors::{EvalError, EvalResult};
pub use self::evaluator::{
    EvaluationOptions, EvaluationRow, EvaluationSummary, ForecastRecord, evaluate_forecasts,
};
pub use self::realized::{
    DEFAULT_RV_WINDOW, RealizedVolPoint, realized_vol_anchor_pct, realized_volatility,
    realized_volatility_path,
};
