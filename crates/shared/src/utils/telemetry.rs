use crate::utils::{Method, Metrics, Status};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{error, info};

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

/// Span and request metrics for one service.
#[derive(Clone)]
pub struct ServiceTelemetry {
    tracer_name: &'static str,
    metrics: Metrics,
}

impl ServiceTelemetry {
    pub fn new(tracer_name: &'static str, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(&tracer_name.replace('-', "_"), registry);

        Self {
            tracer_name,
            metrics,
        }
    }

    fn tracer(&self) -> BoxedTracer {
        global::tracer(self.tracer_name)
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        TracingContext {
            cx: Context::current_with_span(span),
            start_time,
        }
    }

    pub fn success(&self, ctx: &TracingContext, method: Method, message: &str) {
        self.complete(ctx, method, true, message);
    }

    pub fn failure(&self, ctx: &TracingContext, method: Method, message: &str) {
        self.complete(ctx, method, false, message);
    }

    fn complete(&self, ctx: &TracingContext, method: Method, is_success: bool, message: &str) {
        let elapsed = ctx.start_time.elapsed().as_secs_f64();
        let (status_str, status) = if is_success {
            ("SUCCESS", Status::Success)
        } else {
            ("ERROR", Status::Error)
        };

        ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ {message}");
        } else {
            error!("❌ {message}");
        }

        self.metrics.record(method, status, elapsed);
        ctx.cx.span().end();
    }

    /// Runs `result` through the span bookkeeping and hands it back.
    pub fn finish<T, E: std::fmt::Display>(
        &self,
        ctx: &TracingContext,
        method: Method,
        success_message: &str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        match &result {
            Ok(_) => self.success(ctx, method, success_message),
            Err(err) => self.failure(ctx, method, &err.to_string()),
        }
        result
    }
}
