use async_trait::async_trait;
use mockall::mock;

use crate::{
    model::{
        entity::{
            AcquiredRight, EquipmentChain, EquipmentType, Metric, MetricDefinition, ProductData,
            ProductInfo, ProductUser,
        },
        vo::{
            ComputedAcs, ComputedAttrSum, ComputedEquipAttr, ComputedIps, ComputedMetric,
            ComputedNup, ComputedOps, ComputedSps,
        },
    },
    repository::{LicenseRepo, RepoResult},
};

mock! {
    pub LicenseRepo {}
    #[async_trait]
    impl LicenseRepo for LicenseRepo {
        async fn equipment_types(&self, scope: &str) -> RepoResult<Vec<EquipmentType>>;
        async fn metrics(&self, scope: &str) -> RepoResult<Vec<Metric>>;
        async fn metric_definitions(&self, scope: &str) -> RepoResult<Vec<MetricDefinition>>;
        async fn equipment_chain(
            &self,
            equip_id: &str,
            equip_type: &str,
            depth: usize,
            scope: &str,
        ) -> RepoResult<EquipmentChain>;
        async fn products_for_equipment(
            &self,
            equip_id: &str,
            equip_type: &str,
            level_offset: usize,
            plan: &ComputedMetric,
            scope: &str,
        ) -> RepoResult<Vec<ProductData>>;
        async fn equipment_licenses(
            &self,
            equip_id: &str,
            equip_type: &str,
            plan: &ComputedOps,
            scope: &str,
        ) -> RepoResult<i64>;
        async fn equipment_licenses_full(
            &self,
            equip_id: &str,
            equip_type: &str,
            plan: &ComputedOps,
            scope: &str,
        ) -> RepoResult<(i64, f64)>;
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
        async fn attr_sum_values(
            &self,
            plan: &ComputedAttrSum,
            swidtags: &[String],
            scope: &str,
        ) -> RepoResult<f64>;
        async fn user_sum_total(&self, swidtags: &[String], scope: &str) -> RepoResult<u64>;
        async fn equip_attr_sum(
            &self,
            plan: &ComputedEquipAttr,
            swidtags: &[String],
            scope: &str,
        ) -> RepoResult<u64>;
        async fn product_users(&self, swidtag: &str, scope: &str) -> RepoResult<Vec<ProductUser>>;
        async fn acquired_rights(&self, swidtag: &str, scope: &str) -> RepoResult<Vec<AcquiredRight>>;
        async fn product_information(&self, swidtag: &str, scope: &str) -> RepoResult<ProductInfo>;
    }
}
