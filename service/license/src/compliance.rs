use std::sync::Arc;

use async_trait::async_trait;
use domain_license::{
    exception::{LicenseException, LicenseResult},
    model::{
        entity::ProductUser,
        vo::{ComplianceRow, ComputedMetric, MetricProductLicenses},
    },
    repository::{LicenseRepo, RepoError},
    service::LicenseComplianceService,
};
use typed_builder::TypedBuilder;

use crate::resolve::computed_metric;

#[derive(TypedBuilder)]
pub struct LicenseComplianceServiceImpl {
    license_repo: Arc<dyn LicenseRepo>,
}

#[async_trait]
impl LicenseComplianceService for LicenseComplianceServiceImpl {
    async fn compliance_for_product(
        &self,
        swidtag: &str,
        scope: &str,
    ) -> LicenseResult<Vec<ComplianceRow>> {
        let rights = match self.license_repo.acquired_rights(swidtag, scope).await {
            Ok(rights) => rights,
            Err(RepoError::NoData | RepoError::NotFound) => return Ok(vec![]),
            Err(e) => return Err(LicenseException::internal(e)),
        };
        if rights.is_empty() {
            return Ok(vec![]);
        }

        let num_equipments = match self.license_repo.product_information(swidtag, scope).await {
            Ok(info) => info.num_equipments,
            Err(RepoError::NoData | RepoError::NotFound) => 0,
            Err(e) => return Err(LicenseException::internal(e)),
        };

        let metrics = list_or_empty(self.license_repo.metrics(scope).await)?;
        let definitions = list_or_empty(self.license_repo.metric_definitions(scope).await)?;
        let types = list_or_empty(self.license_repo.equipment_types(scope).await)?;

        let swidtags = vec![swidtag.to_string()];
        let mut rows = Vec::with_capacity(rights.len());
        for right in rights {
            let mut row = ComplianceRow {
                sku: right.sku.clone(),
                swidtag: swidtag.to_string(),
                metric: right.metric.clone(),
                num_acq_licenses: right.acquired_licenses,
                total_cost: right.total_cost,
                avg_unit_price: right.avg_unit_price,
                ..Default::default()
            };

            if !metrics.iter().any(|m| m.name.eq_ignore_ascii_case(&right.metric)) {
                tracing::warn!(
                    "compliance: metric {} of sku {} is not configured, reporting zero computed licenses",
                    right.metric,
                    right.sku
                );
                degrade(&mut row);
                rows.push(row);
                continue;
            }
            if num_equipments == 0 {
                tracing::warn!("compliance: no equipments linked with product {swidtag}");
                row.not_deployed = true;
                degrade(&mut row);
                rows.push(row);
                continue;
            }

            let computed = match computed_metric(&definitions, &types, &right.metric) {
                Ok(plan) => self.computed_licenses(&plan, &swidtags, scope).await,
                Err(e) => Err(e),
            };
            match computed {
                Ok((licenses, details)) => {
                    row.num_cpt_licenses = licenses as i64;
                    row.delta_number = right.acquired_licenses - row.num_cpt_licenses;
                    row.delta_cost = row.delta_number as f64 * right.avg_unit_price;
                    row.computed_details = details;
                }
                Err(e) => {
                    tracing::warn!(
                        "compliance: cannot compute metric {} for sku {}: {e}",
                        right.metric,
                        right.sku
                    );
                    degrade(&mut row);
                }
            }
            rows.push(row);
        }
        Ok(rows)
    }

    async fn product_licenses_for_metric(
        &self,
        swidtag: &str,
        metric_name: &str,
        unit_cost: f64,
        scope: &str,
    ) -> LicenseResult<MetricProductLicenses> {
        let definitions = list_or_empty(self.license_repo.metric_definitions(scope).await)?;
        let types = list_or_empty(self.license_repo.equipment_types(scope).await)?;

        let plan = computed_metric(&definitions, &types, metric_name)?;
        let swidtags = vec![swidtag.to_string()];
        let (licenses, _) = self.computed_licenses(&plan, &swidtags, scope).await?;

        Ok(MetricProductLicenses {
            metric_name: metric_name.to_string(),
            num_cpt_licenses: licenses,
            total_cost: licenses as f64 * unit_cost,
        })
    }
}

impl LicenseComplianceServiceImpl {
    /// Computed license count under a resolved plan, plus the human-readable
    /// computation detail where the kind carries one.
    async fn computed_licenses(
        &self,
        plan: &ComputedMetric,
        swidtags: &[String],
        scope: &str,
    ) -> LicenseResult<(u64, String)> {
        let repo = &*self.license_repo;
        Ok(match plan {
            ComputedMetric::Ops(p) => {
                (count_or_zero(repo.ops_licenses(p, swidtags, scope).await)?, String::new())
            }
            ComputedMetric::Nup(p) => {
                let base = count_or_zero(repo.ops_licenses(&p.ops, swidtags, scope).await)?;
                let scaled = base * u64::from(p.number_of_users);
                let users = match repo.product_users(&swidtags[0], scope).await {
                    Ok(users) => users,
                    Err(RepoError::NoData) => vec![],
                    Err(e) => return Err(LicenseException::internal(e)),
                };
                let total_users: i64 = users.iter().map(|u| u.user_count).sum();
                (user_floor(scaled, &users), format!("Total users: {total_users}"))
            }
            ComputedMetric::Ips(p) => {
                (count_or_zero(repo.ips_licenses(p, swidtags, scope).await)?, String::new())
            }
            ComputedMetric::Sps(p) => {
                let (prod, non_prod) = match repo.sps_licenses(p, swidtags, scope).await {
                    Ok(counts) => counts,
                    Err(RepoError::NoData) => (0, 0),
                    Err(e) => return Err(LicenseException::internal(e)),
                };
                (prod.max(non_prod), String::new())
            }
            ComputedMetric::Acs(p) => {
                (count_or_zero(repo.acs_licenses(p, swidtags, scope).await)?, String::new())
            }
            ComputedMetric::AttrSum(p) => {
                let sum = match repo.attr_sum_values(p, swidtags, scope).await {
                    Ok(sum) => sum,
                    Err(RepoError::NoData) => 0.0,
                    Err(e) => return Err(LicenseException::internal(e)),
                };
                let licenses = (sum / p.reference_value).ceil() as u64;
                (licenses, format!("Sum of values: {}", display_number(sum)))
            }
            ComputedMetric::UserSum(_) => {
                let total = count_or_zero(repo.user_sum_total(swidtags, scope).await)?;
                (total, format!("Total users: {total}"))
            }
            ComputedMetric::EquipAttr(p) => {
                (count_or_zero(repo.equip_attr_sum(p, swidtags, scope).await)?, String::new())
            }
        })
    }
}

fn degrade(row: &mut ComplianceRow) {
    row.num_cpt_licenses = 0;
    row.delta_number = row.num_acq_licenses;
    row.delta_cost = row.num_acq_licenses as f64 * row.avg_unit_price;
}

/// Named-user floor: every user consumes at least their own user count.
/// Without user records the plain scaled count stands.
fn user_floor(scaled: u64, users: &[ProductUser]) -> u64 {
    if users.is_empty() {
        return scaled;
    }
    users.iter().map(|u| (scaled as i64).max(u.user_count) as u64).sum()
}

fn list_or_empty<T>(result: Result<Vec<T>, RepoError>) -> LicenseResult<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(RepoError::NoData) => Ok(vec![]),
        Err(e) => Err(LicenseException::internal(e)),
    }
}

fn count_or_zero<T: Default>(result: Result<T, RepoError>) -> LicenseResult<T> {
    match result {
        Ok(count) => Ok(count),
        Err(RepoError::NoData) => Ok(T::default()),
        Err(e) => Err(LicenseException::internal(e)),
    }
}

fn display_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
