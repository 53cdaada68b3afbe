// ABOUTME: Renders the GKE upgrade risk report prompt from cluster arguments.
// ABOUTME: Exposes prompt metadata (name, argument descriptors) for a dispatch layer.

use serde::Serialize;

use crate::error::PromptError;

pub const UPGRADE_RISK_REPORT_PROMPT_NAME: &str = "gke:upgraderiskreport";
pub const UPGRADE_RISK_REPORT_DESCRIPTION: &str = "Generate GKE cluster upgrade risk report.";

pub const CLUSTER_NAME_ARG: &str = "cluster_name";
pub const CLUSTER_LOCATION_ARG: &str = "cluster_location";
pub const TARGET_VERSION_ARG: &str = "target_version";

/// Describes one argument a prompt accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

pub const UPGRADE_RISK_REPORT_ARGUMENTS: &[PromptArgument] = &[
    PromptArgument {
        name: CLUSTER_NAME_ARG,
        description: "A name of a GKE cluster user want to upgrade.",
        required: true,
    },
    PromptArgument {
        name: CLUSTER_LOCATION_ARG,
        description: "A location of a GKE cluster user want to upgrade.",
        required: true,
    },
    PromptArgument {
        name: TARGET_VERSION_ARG,
        description: "A version user want to upgrade their cluster to.",
        required: false,
    },
];

/// Instructions appended after the cluster header lines.
const UPGRADE_RISK_REPORT_BODY: &str = r#"
You are a GKE expert, and you have to generate an upgrade risk report for the cluster before it gets upgraded to the target version from its current version. An upgrade risk report is used to estimate how safe it is to perform the upgrade. The cluster current version is its control plane version. Warn the user if node pool versions differ from the cluster current version.

If the target version is not provided, you should ask the user to specify one. To help the user choose, provide a list of relevant upgrade versions. This list should be derived by:
- Fetching available versions using `gcloud container get-server-config`.
- Filtering these versions based on the cluster's current release channel.
- Displaying only versions that are newer than the cluster's current control plane version.

The upgrade risk report focuses on a specific GKE upgrade risks which may arise when upgrading the cluster from the current version to the target version.

For fetching any in-cluster resources use kubectl tool and gcloud get-credentials. For fetching any cluster information use gcloud.

The report is based on changes which are brought by the target version and versions between the current and the target versions. You extract relevant changes from kubernetes changelogs.

You get relevant kubernetes changelogs using the `get_k8s_changelog` tool.
When getting Kubernetes changelogs, you must consider every minor version from the current minor version up to and including the target minor version. For example, if upgrading from 1.29.x to 1.31.y, you must get changelogs for 1.29, 1.30 and 1.31 minor versions.
When analyzing kubernetes changelogs, you must consider changes for every patch version from the current version (not including) up to and including the target version. For example, if upgrading from 1.29.1 to 1.29.5, you must process all changes brought by versions 1.29.2, 1.29.3, 1.29.4, 1.29.5.

You take a set of relevant changes and transform it to a set of risks the upgrade may be affected. The set of risks will be used by the user to ensure that the upgrade is safe. Each risk item must tell how severe it is using terms LOW, MEDIUM, HIGH from perspective how much harmful a change can be for user's workloads if such an upgrade happen.

You should analyse relevant changes and identify potential risks such as changes which require immediate manual intervention during or after the upgradeare to prevent service disruption, data loss, security vulnerabilities, etc. For example:
- Deprecated and removed APIs;
- Significant behavioral changes in existing features;
- Changes to default configurations;
- New features that might interact with existing workloads in destructive way.

Be specific about each risk, do not group various risks under general headings.

The set of risks represents the requested upgrade risk report. You present it as a list following the rules:
- there is only one list;
- each list item contains Severity, Risk description, Verification recommendations, Mitigation recommendations;
- list items are ordered by severity from HIGH to LOW;
- items are printed as text one under another.

Verification and mitigation recommendations should provide clear, actionable steps the user can take to verify/mitigate the risk. This includes command examples, configuration changes, links to specific Google Cloud documentation, or Kubernetes resources.

```The markdown format of a single risk item:

# Short risk title

## Description

Risk description...

## Verification recommendations

Risk verification recommendations...

## Mitigation recommendations

Mitigation recommendations...
```"#;

/// Caller-supplied arguments for the upgrade risk report prompt.
#[derive(Debug, Clone, Default)]
pub struct UpgradeRiskReportArgs {
    pub cluster_name: String,
    pub cluster_location: String,
    pub target_version: Option<String>,
}

/// A single rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub text: String,
}

/// The rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptResult {
    pub description: &'static str,
    pub messages: Vec<PromptMessage>,
}

fn required(value: &str, name: &'static str) -> Result<String, PromptError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PromptError::EmptyArgument(name));
    }
    Ok(trimmed.to_string())
}

/// Renders the upgrade risk report prompt.
///
/// `cluster_name` and `cluster_location` are trimmed and must be non-empty.
/// A missing target version renders as an empty value, which the prompt text
/// instructs the model to ask about.
pub fn render_upgrade_risk_report(
    args: &UpgradeRiskReportArgs,
) -> Result<PromptResult, PromptError> {
    let cluster_name = required(&args.cluster_name, CLUSTER_NAME_ARG)?;
    let cluster_location = required(&args.cluster_location, CLUSTER_LOCATION_ARG)?;
    let target_version = args.target_version.as_deref().map(str::trim).unwrap_or("");

    let text = format!(
        "\nCluster name: {}\nCluster location: {}\nTarget version: {}\n{}",
        cluster_name, cluster_location, target_version, UPGRADE_RISK_REPORT_BODY
    );

    Ok(PromptResult {
        description: "GKE Cluster Upgrade Risk Report Prompt",
        messages: vec![PromptMessage { role: "user", text }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str, location: &str, target: Option<&str>) -> UpgradeRiskReportArgs {
        UpgradeRiskReportArgs {
            cluster_name: name.to_string(),
            cluster_location: location.to_string(),
            target_version: target.map(str::to_string),
        }
    }

    #[test]
    fn renders_header_lines_with_trimmed_values() {
        let result =
            render_upgrade_risk_report(&args("  prod ", "us-central1", Some(" 1.33.2-gke.100 ")))
                .unwrap();
        assert_eq!(result.messages.len(), 1);
        let msg = &result.messages[0];
        assert_eq!(msg.role, "user");
        assert!(msg.text.starts_with(
            "\nCluster name: prod\nCluster location: us-central1\nTarget version: 1.33.2-gke.100\n"
        ));
        assert!(msg.text.contains("`get_k8s_changelog` tool"));
        assert!(msg.text.ends_with("Mitigation recommendations...\n```"));
    }

    #[test]
    fn body_keeps_upstream_wording() {
        let result = render_upgrade_risk_report(&args("prod", "us-central1", None)).unwrap();
        assert!(result.messages[0]
            .text
            .contains("manual intervention during or after the upgradeare to prevent service disruption"));
    }

    #[test]
    fn missing_target_version_renders_empty() {
        let result = render_upgrade_risk_report(&args("prod", "europe-west1", None)).unwrap();
        assert!(result.messages[0].text.contains("Target version: \n"));
    }

    #[test]
    fn blank_cluster_name_is_rejected() {
        let err = render_upgrade_risk_report(&args("   ", "us-central1", None)).unwrap_err();
        assert_eq!(err, PromptError::EmptyArgument(CLUSTER_NAME_ARG));
        assert_eq!(err.to_string(), "argument 'cluster_name' cannot be empty");
    }

    #[test]
    fn blank_cluster_location_is_rejected() {
        let err = render_upgrade_risk_report(&args("prod", "", None)).unwrap_err();
        assert_eq!(err, PromptError::EmptyArgument(CLUSTER_LOCATION_ARG));
    }

    #[test]
    fn only_target_version_is_optional() {
        let optional: Vec<_> = UPGRADE_RISK_REPORT_ARGUMENTS
            .iter()
            .filter(|a| !a.required)
            .map(|a| a.name)
            .collect();
        assert_eq!(optional, vec![TARGET_VERSION_ARG]);
    }
}
