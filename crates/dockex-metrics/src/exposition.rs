use std::collections::BTreeMap;

use crate::types::{MetricDescriptor, MetricRecord};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders one scrape in the Prometheus text exposition format.
///
/// Families are ordered by name and samples by label values, so an unchanged runtime
/// renders identical series lines on every scrape.
pub fn render_prometheus(records: &[MetricRecord]) -> String {
    let mut families: BTreeMap<&'static str, (&'static MetricDescriptor, Vec<&MetricRecord>)> =
        BTreeMap::new();
    for record in records {
        families
            .entry(record.name())
            .or_insert_with(|| (record.descriptor, Vec::new()))
            .1
            .push(record);
    }

    let mut output = String::new();
    for (name, (descriptor, mut samples)) in families {
        samples.sort_by(|left, right| left.labels.cmp(&right.labels));

        output.push_str("# HELP ");
        output.push_str(name);
        output.push(' ');
        output.push_str(&escape_help(descriptor.help));
        output.push('\n');

        output.push_str("# TYPE ");
        output.push_str(name);
        output.push(' ');
        output.push_str(descriptor.metric_type.as_prometheus_type());
        output.push('\n');

        for sample in samples {
            output.push_str(&render_sample_line(name, &sample.labels, sample.value));
        }
    }

    output
}

fn render_sample_line(name: &str, labels: &[(&'static str, String)], value: f64) -> String {
    let mut rendered = String::new();
    rendered.push_str(name);

    if !labels.is_empty() {
        rendered.push('{');
        for (index, (key, value)) in labels.iter().enumerate() {
            if index > 0 {
                rendered.push(',');
            }
            rendered.push_str(key);
            rendered.push_str("=\"");
            rendered.push_str(&escape_label_value(value));
            rendered.push('"');
        }
        rendered.push('}');
    }

    rendered.push(' ');
    rendered.push_str(&format_metric_value(value));
    rendered.push('\n');
    rendered
}

fn format_metric_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn escape_help(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::{format_metric_value, render_prometheus};
    use crate::catalog::{CONTAINER_RUNNING, CPU_UTILIZATION_SECONDS_TOTAL, UP, VOLUME_USAGE_BYTES};

    #[test]
    fn renders_families_sorted_with_metadata() {
        let records = vec![
            CONTAINER_RUNNING.record(1.0, &["web", "nginx:1.27"]),
            UP.record(1.0, &[]),
            CONTAINER_RUNNING.record(0.0, &["batch", "busybox"]),
            CPU_UTILIZATION_SECONDS_TOTAL.record(1.5, &["web", "nginx:1.27"]),
        ];

        let expected = "\
# HELP container_running 1 if docker container is running, 0 otherwise
# TYPE container_running gauge
container_running{container_name=\"batch\",image=\"busybox\"} 0
container_running{container_name=\"web\",image=\"nginx:1.27\"} 1
# HELP cpu_utilization_seconds_total Cumulative CPU utilization in seconds
# TYPE cpu_utilization_seconds_total counter
cpu_utilization_seconds_total{container_name=\"web\",image=\"nginx:1.27\"} 1.5
# HELP up docker exporter up status
# TYPE up gauge
up 1
";
        assert_eq!(render_prometheus(&records), expected);
    }

    #[test]
    fn output_does_not_depend_on_arrival_order() {
        let forward = vec![
            VOLUME_USAGE_BYTES.record(10.0, &["a"]),
            VOLUME_USAGE_BYTES.record(20.0, &["b"]),
        ];
        let backward = vec![
            VOLUME_USAGE_BYTES.record(20.0, &["b"]),
            VOLUME_USAGE_BYTES.record(10.0, &["a"]),
        ];

        assert_eq!(render_prometheus(&forward), render_prometheus(&backward));
    }

    #[test]
    fn escapes_label_values() {
        let records = vec![VOLUME_USAGE_BYTES.record(1.0, &["odd\"name\\with\nnewline"])];
        let rendered = render_prometheus(&records);
        assert!(rendered.contains(r#"volume_usage_bytes{volume_name="odd\"name\\with\nnewline"} 1"#));
    }

    #[test]
    fn formats_special_values() {
        assert_eq!(format_metric_value(0.0), "0");
        assert_eq!(format_metric_value(-1.0), "-1");
        assert_eq!(format_metric_value(40.5), "40.5");
        assert_eq!(format_metric_value(f64::NAN), "NaN");
        assert_eq!(format_metric_value(f64::INFINITY), "+Inf");
        assert_eq!(format_metric_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_metric_value(1e20), "100000000000000000000");
    }

    #[test]
    fn empty_scrape_renders_nothing() {
        assert_eq!(render_prometheus(&[]), "");
    }
}
