//! AWS ELB inspector adapter.
//!
//! Drives the AWS CLI with `--output json` and deserializes the documented
//! response shapes with serde. Callers never see command output; they get the
//! DNS name or tag value, or a typed error.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::config::AwsConfig;
use crate::inspector::{Inspect, InspectorError};

/// Tag key carrying the deployment environment of a balancer.
const ENVIRONMENT_TAG_KEY: &str = "ENVIRONMENT_EB";

/// Inspector backed by the `aws elb` command-line interface.
pub struct AwsCliInspector {
    cli_bin: String,
    region: String,
}

#[derive(Debug, Deserialize)]
struct DescribeLoadBalancersResponse {
    #[serde(rename = "LoadBalancerDescriptions", default)]
    descriptions: Vec<LoadBalancerDescription>,
}

#[derive(Debug, Deserialize)]
struct LoadBalancerDescription {
    #[serde(rename = "DNSName", default)]
    dns_name: String,
}

#[derive(Debug, Deserialize)]
struct DescribeTagsResponse {
    #[serde(rename = "TagDescriptions", default)]
    tag_descriptions: Vec<TagDescription>,
}

#[derive(Debug, Deserialize)]
struct TagDescription {
    #[serde(rename = "Tags", default)]
    tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Value", default)]
    value: String,
}

impl AwsCliInspector {
    pub fn new(config: &AwsConfig) -> Self {
        Self {
            cli_bin: config.cli_bin.clone(),
            region: config.region.clone(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<u8>, InspectorError> {
        let output = Command::new(&self.cli_bin)
            .args(args)
            .args(["--output", "json", "--region", &self.region])
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            return Err(InspectorError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl Inspect for AwsCliInspector {
    async fn describe(&self, name: &str) -> Result<String, InspectorError> {
        let stdout = self
            .run(&["elb", "describe-load-balancers", "--load-balancer-names", name])
            .await?;
        parse_describe(&stdout, name)
    }

    async fn environment_tag(&self, name: &str) -> Result<String, InspectorError> {
        let stdout = self
            .run(&["elb", "describe-tags", "--load-balancer-names", name])
            .await?;
        parse_environment_tag(&stdout, name)
    }
}

fn parse_describe(stdout: &[u8], name: &str) -> Result<String, InspectorError> {
    let response: DescribeLoadBalancersResponse = serde_json::from_slice(stdout)?;

    response
        .descriptions
        .into_iter()
        .map(|d| d.dns_name)
        .find(|dns| !dns.is_empty())
        .ok_or_else(|| InspectorError::NotFound {
            name: name.to_string(),
        })
}

fn parse_environment_tag(stdout: &[u8], name: &str) -> Result<String, InspectorError> {
    let response: DescribeTagsResponse = serde_json::from_slice(stdout)?;

    response
        .tag_descriptions
        .into_iter()
        .flat_map(|d| d.tags)
        .find(|tag| tag.key == ENVIRONMENT_TAG_KEY && !tag.value.is_empty())
        .map(|tag| tag.value)
        .ok_or_else(|| InspectorError::MissingTag {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_describe_extracts_dns_name() {
        let payload = br#"{
            "LoadBalancerDescriptions": [
                {"LoadBalancerName": "lb-a", "DNSName": "lb-a-123.us-east-1.elb.amazonaws.com"}
            ]
        }"#;

        let dns = parse_describe(payload, "lb-a").unwrap();
        assert_eq!(dns, "lb-a-123.us-east-1.elb.amazonaws.com");
    }

    #[test]
    fn test_parse_describe_empty_list_is_not_found() {
        let payload = br#"{"LoadBalancerDescriptions": []}"#;
        let err = parse_describe(payload, "lb-a").unwrap_err();
        assert!(matches!(err, InspectorError::NotFound { .. }));
    }

    #[test]
    fn test_parse_describe_rejects_garbage() {
        let err = parse_describe(b"not json", "lb-a").unwrap_err();
        assert!(matches!(err, InspectorError::Parse(_)));
    }

    #[test]
    fn test_parse_tag_picks_environment_key() {
        let payload = br#"{
            "TagDescriptions": [
                {
                    "LoadBalancerName": "lb-a",
                    "Tags": [
                        {"Key": "TEAM", "Value": "platform"},
                        {"Key": "ENVIRONMENT_EB", "Value": "stage"}
                    ]
                }
            ]
        }"#;

        let env = parse_environment_tag(payload, "lb-a").unwrap();
        assert_eq!(env, "stage");
    }

    #[test]
    fn test_parse_tag_missing_key_is_error() {
        let payload = br#"{
            "TagDescriptions": [
                {"LoadBalancerName": "lb-a", "Tags": [{"Key": "TEAM", "Value": "platform"}]}
            ]
        }"#;

        let err = parse_environment_tag(payload, "lb-a").unwrap_err();
        assert!(matches!(err, InspectorError::MissingTag { .. }));
    }

    #[test]
    fn test_parse_tag_empty_value_is_error() {
        let payload = br#"{
            "TagDescriptions": [
                {"LoadBalancerName": "lb-a", "Tags": [{"Key": "ENVIRONMENT_EB", "Value": ""}]}
            ]
        }"#;

        let err = parse_environment_tag(payload, "lb-a").unwrap_err();
        assert!(matches!(err, InspectorError::MissingTag { .. }));
    }
}
