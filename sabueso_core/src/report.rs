use crate::scan::Finding;

/// Single-line human-readable form of a finding.
pub fn format_finding(finding: &Finding) -> String {
    match finding {
        Finding::MissingReference {
            context,
            path,
            component,
            property,
            ..
        } => format!(
            "Missing Ref in: [{context}]{path}. Component: {component}, Property: {property}"
        ),
        Finding::MissingComponent { context, path, .. } => {
            format!("Missing Component in: [{context}]{path}")
        }
    }
}

/// Output boundary for findings. The scanner itself never aggregates or
/// stores anything; callers that need a count or an exit status derive it by
/// consuming the sequence.
pub trait DiagnosticSink {
    fn emit(&mut self, finding: &Finding);
}

/// Emits one error line per finding through the `log` crate, tagged with the
/// originating node id so a console can offer navigation back to the object.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, finding: &Finding) {
        log::error!(
            target: "sabueso",
            "{} (node {})",
            format_finding(finding),
            finding.node()
        );
    }
}

/// Buffers findings for callers that want to inspect or count them.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub findings: Vec<Finding>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl DiagnosticSink for CollectSink {
    fn emit(&mut self, finding: &Finding) {
        self.findings.push(finding.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uid32::NodeID;

    #[test]
    fn reference_finding_format() {
        let finding = Finding::MissingReference {
            context: "res://scenes/main.scn".to_string(),
            node: NodeID::from_u32(2),
            path: "Root/Child".to_string(),
            component: "Renderer".to_string(),
            property: "Material".to_string(),
        };
        assert_eq!(
            format_finding(&finding),
            "Missing Ref in: [res://scenes/main.scn]Root/Child. Component: Renderer, Property: Material"
        );
    }

    #[test]
    fn component_finding_format() {
        let finding = Finding::MissingComponent {
            context: "Project".to_string(),
            node: NodeID::from_u32(7),
            path: "Root/Child".to_string(),
        };
        assert_eq!(
            format_finding(&finding),
            "Missing Component in: [Project]Root/Child"
        );
    }

    #[test]
    fn collect_sink_buffers_in_order() {
        let mut sink = CollectSink::new();
        assert!(sink.is_empty());

        sink.emit(&Finding::MissingComponent {
            context: "ctx".to_string(),
            node: NodeID::from_u32(1),
            path: "A".to_string(),
        });
        sink.emit(&Finding::MissingComponent {
            context: "ctx".to_string(),
            node: NodeID::from_u32(2),
            path: "B".to_string(),
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.findings[0].path(), "A");
        assert_eq!(sink.findings[1].path(), "B");
    }
}
