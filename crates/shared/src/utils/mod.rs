mod logs;
mod metrics;
mod otel;
mod pagination;
mod pricing;
mod random_string;
mod shutdown;
mod telemetry;

pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::otel::Telemetry;
pub use self::pagination::PageWindow;
pub use self::pricing::{discount_percentage, discounted_price, format_amount};
pub use self::random_string::generate_random_string;
pub use self::shutdown::shutdown_signal;
pub use self::telemetry::{ServiceTelemetry, TracingContext};
