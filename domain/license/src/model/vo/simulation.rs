use serde::{Deserialize, Serialize};

use crate::model::entity::{Attribute, MetricKind, ProductData};

/// A hypothetical hardware change: attribute overrides on one equipment
/// individual, evaluated against a set of metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub equip_type: String,
    pub equip_id: String,
    /// Attributes carrying the `val`/`old_val` overlay.
    pub attributes: Vec<Attribute>,
    pub metric_details: Vec<MetricSimDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSimDetail {
    pub metric_type: MetricKind,
    pub metric_name: String,
}

/// Simulation outcome: per-metric successes next to per-metric failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub metrics: Vec<SimulatedProductsLicenses>,
    pub failures: Vec<SimFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedProductsLicenses {
    pub metric_name: String,
    pub metric_kind: MetricKind,
    pub licenses: Vec<SimulatedProductLicense>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedProductLicense {
    pub product: ProductData,
    pub metric_name: String,
    pub old_licenses: i64,
    pub new_licenses: i64,
    pub delta: i64,
}

/// A metric that could not be simulated; other metrics in the same request
/// are unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimFailure {
    pub metric_name: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use uuid::Uuid;

    use super::*;
    use crate::model::entity::{AttributeValue, DataType};

    #[test]
    fn deserialize_simulation_request() {
        let json = indoc! {r#"
            {
              "equipType": "server",
              "equipId": "srv-42",
              "attributes": [
                {
                  "id": "00000000-0000-0000-0000-000000000000",
                  "name": "cores",
                  "dataType": "Int",
                  "simulated": true,
                  "val": 16,
                  "oldVal": 8
                }
              ],
              "metricDetails": [
                { "metricType": "oracle.processor.standard", "metricName": "ops" }
              ]
            }"#};
        let req: SimulationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.equip_id, "srv-42");
        let attr = &req.attributes[0];
        assert_eq!(attr.id, Uuid::nil());
        assert_eq!(attr.data_type, DataType::Int);
        assert_eq!(attr.val, Some(AttributeValue::Int(16)));
        assert_eq!(attr.old_val, Some(AttributeValue::Int(8)));
        assert_eq!(req.metric_details[0].metric_type, MetricKind::Ops);
    }
}
