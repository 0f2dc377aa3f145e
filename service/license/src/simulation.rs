use std::sync::Arc;

use async_trait::async_trait;
use domain_license::{
    exception::{LicenseException, LicenseResult},
    model::{
        entity::{EquipmentChain, EquipmentType, MetricDefinition, ProductUser},
        vo::{
            ComputedMetric, ComputedNup, ComputedOps, SimFailure, SimulatedProductLicense,
            SimulatedProductsLicenses, SimulationRequest, SimulationResponse,
        },
    },
    repository::{LicenseRepo, RepoError},
    service::HardwareSimulationService,
};
use typed_builder::TypedBuilder;

use crate::resolve::computed_metric;

#[derive(TypedBuilder)]
pub struct HardwareSimulationServiceImpl {
    license_repo: Arc<dyn LicenseRepo>,
}

#[async_trait]
impl HardwareSimulationService for HardwareSimulationServiceImpl {
    async fn simulate(
        &self,
        request: &SimulationRequest,
        scope: &str,
    ) -> LicenseResult<SimulationResponse> {
        let definitions = match self.license_repo.metric_definitions(scope).await {
            Ok(defs) => defs,
            Err(RepoError::NoData) => vec![],
            Err(e) => return Err(LicenseException::internal(e)),
        };
        let types = match self.license_repo.equipment_types(scope).await {
            Ok(types) => types,
            Err(RepoError::NoData) => vec![],
            Err(e) => return Err(LicenseException::internal(e)),
        };

        let mut response = SimulationResponse::default();
        for detail in &request.metric_details {
            match self.simulate_metric(request, &detail.metric_name, &definitions, &types, scope).await
            {
                Ok(licenses) => response.metrics.push(licenses),
                // A missing equipment individual invalidates the whole
                // request, not just one metric.
                Err(e @ LicenseException::EquipmentNotFound) => return Err(e),
                Err(e) => {
                    tracing::warn!("simulation: metric {} failed: {e}", detail.metric_name);
                    response
                        .failures
                        .push(SimFailure { metric_name: detail.metric_name.clone(), reason: e.to_string() });
                }
            }
        }
        Ok(response)
    }
}

impl HardwareSimulationServiceImpl {
    async fn simulate_metric(
        &self,
        request: &SimulationRequest,
        metric_name: &str,
        definitions: &[MetricDefinition],
        types: &[EquipmentType],
        scope: &str,
    ) -> LicenseResult<SimulatedProductsLicenses> {
        let plan = computed_metric(definitions, types, metric_name)?;
        let kind = plan.kind();
        let licenses = match plan {
            ComputedMetric::Ops(mut plan) => {
                require_base_type(request, plan.base_type(), kind.abbrev())?;
                plan.overlay_attributes(&request.attributes);
                let (_, deltas) = self.simulate_ops(request, &plan, scope).await?;
                deltas
            }
            ComputedMetric::Nup(ComputedNup { ops: mut plan, number_of_users }) => {
                require_base_type(request, plan.base_type(), kind.abbrev())?;
                plan.overlay_attributes(&request.attributes);
                let (chain, base) = self.simulate_ops(request, &plan, scope).await?;
                self.scale_named_users(&chain, &plan, number_of_users, base, scope).await?
            }
            ComputedMetric::Ips(mut plan) => {
                require_base_type(request, &plan.base_type, kind.abbrev())?;
                plan.overlay_attributes(&request.attributes);
                self.simulate_single_level(
                    request,
                    plan.contribution(false),
                    plan.contribution(true),
                    &ComputedMetric::Ips(plan),
                    scope,
                )
                .await?
            }
            ComputedMetric::Sps(mut plan) => {
                require_base_type(request, &plan.base_type, kind.abbrev())?;
                plan.overlay_attributes(&request.attributes);
                self.simulate_single_level(
                    request,
                    plan.contribution(false),
                    plan.contribution(true),
                    &ComputedMetric::Sps(plan),
                    scope,
                )
                .await?
            }
            _ => return Err(LicenseException::SimulationUnsupported),
        };
        Ok(SimulatedProductsLicenses {
            metric_name: metric_name.to_string(),
            metric_kind: kind,
            licenses,
        })
    }

    /// Processor-tree simulation: the aggregate group's pre-ceiling sum is
    /// rebuilt with the overridden contribution, everything outside the group
    /// keeps its already-ceiled count.
    async fn simulate_ops(
        &self,
        request: &SimulationRequest,
        plan: &ComputedOps,
        scope: &str,
    ) -> LicenseResult<(EquipmentChain, Vec<SimulatedProductLicense>)> {
        let depth = plan.eq_type_tree.len() - plan.base_index;
        let chain = self.ancestry(request, depth, scope).await?;
        let top = chain.top().ok_or(LicenseException::EquipmentNotFound)?;

        let level_offset = plan.level_of_type(&top.type_name).map_or(0, |l| l + 1);
        let wrapped = ComputedMetric::Ops(plan.clone());
        let products = match self
            .license_repo
            .products_for_equipment(&top.equip_id, &top.type_name, level_offset, &wrapped, scope)
            .await
        {
            Ok(products) => products,
            Err(RepoError::NoData) => return Ok((chain, vec![])),
            Err(e) => return Err(LicenseException::internal(e)),
        };

        let old_total = match self
            .license_repo
            .equipment_licenses(&top.equip_id, &top.type_name, plan, scope)
            .await
        {
            Ok(count) => count,
            Err(RepoError::NoData) => 0,
            Err(e) => return Err(LicenseException::internal(e)),
        };

        let agg = chain
            .node_of_type(&plan.aggregate_type().type_name)
            .ok_or(LicenseException::EquipmentNotFound)?;
        let (agg_ceiled, agg_unceiled) = match self
            .license_repo
            .equipment_licenses_full(&agg.equip_id, &agg.type_name, plan, scope)
            .await
        {
            Ok(counts) => counts,
            Err(RepoError::NoData) => (0, 0.0),
            Err(e) => return Err(LicenseException::internal(e)),
        };

        let swapped = agg_unceiled - plan.contribution(false) + plan.contribution(true);
        let new_total = old_total - agg_ceiled + swapped.ceil() as i64;

        let licenses = products
            .into_iter()
            .map(|product| SimulatedProductLicense {
                product,
                metric_name: plan.name.clone(),
                old_licenses: old_total,
                new_licenses: new_total,
                delta: new_total - old_total,
            })
            .collect();
        Ok((chain, licenses))
    }

    /// NUP on top of the processor tree: counts scale by the per-license user
    /// allowance, then each product is floored by its named users.
    async fn scale_named_users(
        &self,
        chain: &EquipmentChain,
        plan: &ComputedOps,
        number_of_users: u32,
        base: Vec<SimulatedProductLicense>,
        scope: &str,
    ) -> LicenseResult<Vec<SimulatedProductLicense>> {
        let top = chain.top().ok_or(LicenseException::EquipmentNotFound)?;
        let level_offset = plan.level_of_type(&top.type_name).map_or(0, |l| l + 1);
        let nup = ComputedNup { ops: plan.clone(), number_of_users };

        let mut licenses = Vec::with_capacity(base.len());
        for mut row in base {
            let users = match self
                .license_repo
                .users_for_product(
                    &top.equip_id,
                    &top.type_name,
                    &row.product.swidtag,
                    level_offset,
                    &nup,
                    scope,
                )
                .await
            {
                Ok(users) => users,
                Err(RepoError::NoData) => vec![],
                Err(e) => return Err(LicenseException::internal(e)),
            };
            row.old_licenses = user_floor(row.old_licenses * i64::from(number_of_users), &users);
            row.new_licenses = user_floor(row.new_licenses * i64::from(number_of_users), &users);
            row.delta = row.new_licenses - row.old_licenses;
            licenses.push(row);
        }
        Ok(licenses)
    }

    /// Single-level processor simulation (IPS / SPS): the contribution of the
    /// requested equipment itself is the whole count.
    async fn simulate_single_level(
        &self,
        request: &SimulationRequest,
        old_contribution: f64,
        new_contribution: f64,
        plan: &ComputedMetric,
        scope: &str,
    ) -> LicenseResult<Vec<SimulatedProductLicense>> {
        let products = match self
            .license_repo
            .products_for_equipment(&request.equip_id, &request.equip_type, 1, plan, scope)
            .await
        {
            Ok(products) => products,
            Err(RepoError::NoData) => return Ok(vec![]),
            Err(e) => return Err(LicenseException::internal(e)),
        };

        let (old_licenses, new_licenses) = (old_contribution as i64, new_contribution as i64);
        let metric_name = match plan {
            ComputedMetric::Ips(p) => p.name.clone(),
            ComputedMetric::Sps(p) => p.name.clone(),
            _ => String::new(),
        };
        Ok(products
            .into_iter()
            .map(|product| SimulatedProductLicense {
                product,
                metric_name: metric_name.clone(),
                old_licenses,
                new_licenses,
                delta: new_licenses - old_licenses,
            })
            .collect())
    }

    async fn ancestry(
        &self,
        request: &SimulationRequest,
        depth: usize,
        scope: &str,
    ) -> LicenseResult<EquipmentChain> {
        match self
            .license_repo
            .equipment_chain(&request.equip_id, &request.equip_type, depth, scope)
            .await
        {
            Ok(chain) if chain.is_empty() => Err(LicenseException::EquipmentNotFound),
            Ok(chain) => Ok(chain),
            Err(RepoError::NotFound | RepoError::NoData) => {
                Err(LicenseException::EquipmentNotFound)
            }
            Err(e) => Err(LicenseException::internal(e)),
        }
    }
}

fn require_base_type(
    request: &SimulationRequest,
    base_type: &EquipmentType,
    kind: &'static str,
) -> LicenseResult<()> {
    if request.equip_type != base_type.type_name {
        return Err(LicenseException::SimulationBaseTypeOnly { kind });
    }
    Ok(())
}

fn user_floor(scaled: i64, users: &[ProductUser]) -> i64 {
    if users.is_empty() {
        return scaled;
    }
    users.iter().map(|u| scaled.max(u.user_count)).sum()
}
