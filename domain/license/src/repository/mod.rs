//! Abstract data-access contract of the license engine. Implementations own
//! all persistence and aggregation queries; the engine only interprets the
//! returned counts.

use thiserror::Error;

use crate::model::{
    entity::{
        AcquiredRight, EquipmentChain, EquipmentType, Metric, MetricDefinition, ProductData,
        ProductInfo, ProductUser,
    },
    vo::{
        ComputedAcs, ComputedAttrSum, ComputedEquipAttr, ComputedIps, ComputedMetric, ComputedNup,
        ComputedOps, ComputedSps,
    },
};

pub type RepoResult<T> = Result<T, RepoError>;

/// Sentinel-aware repository error. `NotFound` means a specifically requested
/// record is absent; `NoData` means a query legitimately matched nothing.
/// List-shaped consumers treat `NoData` as an empty success, single-record
/// consumers surface it as not-found.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,
    #[error("no data")]
    NoData,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[async_trait::async_trait]
pub trait LicenseRepo: Send + Sync {
    /// Full per-scope equipment type catalog, attributes included.
    async fn equipment_types(&self, scope: &str) -> RepoResult<Vec<EquipmentType>>;

    /// Name + kind catalog of configured metrics.
    async fn metrics(&self, scope: &str) -> RepoResult<Vec<Metric>>;

    /// Configurations of all metrics in the scope, every kind folded in.
    async fn metric_definitions(&self, scope: &str) -> RepoResult<Vec<MetricDefinition>>;

    /// Ancestry of one equipment individual, nearest-first, at most `depth`
    /// levels. `NotFound` when the equipment is absent.
    async fn equipment_chain(
        &self,
        equip_id: &str,
        equip_type: &str,
        depth: usize,
        scope: &str,
    ) -> RepoResult<EquipmentChain>;

    /// Products installed under the given equipment node, for the metric's
    /// scope of levels. `NoData` is a valid empty result.
    async fn products_for_equipment(
        &self,
        equip_id: &str,
        equip_type: &str,
        level_offset: usize,
        plan: &ComputedMetric,
        scope: &str,
    ) -> RepoResult<Vec<ProductData>>;

    /// Ceiled license count aggregated at the given node.
    async fn equipment_licenses(
        &self,
        equip_id: &str,
        equip_type: &str,
        plan: &ComputedOps,
        scope: &str,
    ) -> RepoResult<i64>;

    /// Ceiled and pre-ceiling license counts at the given node. Used at the
    /// aggregate level, where rounding is applied once per group.
    async fn equipment_licenses_full(
        &self,
        equip_id: &str,
        equip_type: &str,
        plan: &ComputedOps,
        scope: &str,
    ) -> RepoResult<(i64, f64)>;

    /// Named-user records of a product under the given equipment node.
    async fn users_for_product(
        &self,
        equip_id: &str,
        equip_type: &str,
        swidtag: &str,
        level_offset: usize,
        plan: &ComputedNup,
        scope: &str,
    ) -> RepoResult<Vec<ProductUser>>;

    async fn ops_licenses(
        &self,
        plan: &ComputedOps,
        swidtags: &[String],
        scope: &str,
    ) -> RepoResult<u64>;

    async fn ips_licenses(
        &self,
        plan: &ComputedIps,
        swidtags: &[String],
        scope: &str,
    ) -> RepoResult<u64>;

    /// (production, non-production) license counts.
    async fn sps_licenses(
        &self,
        plan: &ComputedSps,
        swidtags: &[String],
        scope: &str,
    ) -> RepoResult<(u64, u64)>;

    async fn acs_licenses(
        &self,
        plan: &ComputedAcs,
        swidtags: &[String],
        scope: &str,
    ) -> RepoResult<u64>;

    /// Raw attribute sum; the engine divides by the reference value and ceils.
    async fn attr_sum_values(
        &self,
        plan: &ComputedAttrSum,
        swidtags: &[String],
        scope: &str,
    ) -> RepoResult<f64>;

    /// Sum of user counts over the products' users.
    async fn user_sum_total(&self, swidtags: &[String], scope: &str) -> RepoResult<u64>;

    async fn equip_attr_sum(
        &self,
        plan: &ComputedEquipAttr,
        swidtags: &[String],
        scope: &str,
    ) -> RepoResult<u64>;

    /// Named-user records of a product, unscoped by equipment.
    async fn product_users(&self, swidtag: &str, scope: &str) -> RepoResult<Vec<ProductUser>>;

    /// Acquired rights of a product. `NoData` is a valid empty result.
    async fn acquired_rights(&self, swidtag: &str, scope: &str) -> RepoResult<Vec<AcquiredRight>>;

    async fn product_information(&self, swidtag: &str, scope: &str) -> RepoResult<ProductInfo>;
}
