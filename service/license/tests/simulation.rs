use std::sync::Arc;

use domain_license::{
    exception::StatusCode,
    mock::MockLicenseRepo,
    model::{
        entity::{
            metric::{MetricAcs, MetricIps, MetricNup, MetricOps, MetricSps},
            Attribute, AttributeValue, DataType, Equipment, EquipmentChain, EquipmentType,
            MetricDefinition, MetricKind, ProductData, ProductUser,
        },
        vo::{MetricSimDetail, SimulationRequest},
    },
    repository::RepoError,
    service::HardwareSimulationService,
};
use service_license::HardwareSimulationServiceImpl;
use uuid::Uuid;

const SCOPE: &str = "FST";

fn attr(id: u128, name: &str) -> Attribute {
    Attribute {
        id: Uuid::from_u128(id),
        name: name.to_string(),
        data_type: DataType::Float,
        ..Default::default()
    }
}

fn override_attr(id: u128, name: &str, old: f32, new: f32) -> Attribute {
    Attribute {
        id: Uuid::from_u128(id),
        name: name.to_string(),
        data_type: DataType::Float,
        simulated: true,
        val: Some(AttributeValue::Float(new)),
        old_val: Some(AttributeValue::Float(old)),
        ..Default::default()
    }
}

fn eq_type(id: u128, name: &str, parent: Option<u128>, attrs: Vec<Attribute>) -> EquipmentType {
    EquipmentType {
        id: Uuid::from_u128(id),
        type_name: name.to_string(),
        parent_id: parent.map(Uuid::from_u128),
        attributes: attrs,
    }
}

fn catalog() -> Vec<EquipmentType> {
    vec![
        eq_type(
            1,
            "partition",
            Some(2),
            vec![attr(11, "cores"), attr(12, "cpus"), attr(13, "corefactor")],
        ),
        eq_type(2, "server", Some(3), vec![]),
        eq_type(3, "cluster", Some(4), vec![]),
        eq_type(4, "vcenter", None, vec![]),
    ]
}

fn ops_metric(name: &str) -> MetricOps {
    MetricOps {
        id: Uuid::from_u128(100),
        name: name.to_string(),
        start_eq_type_id: Uuid::from_u128(1),
        base_eq_type_id: Uuid::from_u128(1),
        aggregate_level_eq_type_id: Uuid::from_u128(3),
        end_eq_type_id: Uuid::from_u128(4),
        core_factor_attr_id: Uuid::from_u128(13),
        num_core_attr_id: Uuid::from_u128(11),
        num_cpu_attr_id: Uuid::from_u128(12),
    }
}

fn node(equip_id: &str, type_name: &str) -> Equipment {
    Equipment {
        id: format!("0x{equip_id}"),
        equip_id: equip_id.to_string(),
        type_name: type_name.to_string(),
    }
}

fn ancestry() -> EquipmentChain {
    EquipmentChain::new(vec![
        node("p1", "partition"),
        node("s1", "server"),
        node("c1", "cluster"),
        node("v1", "vcenter"),
    ])
}

fn request(equip_type: &str, attributes: Vec<Attribute>, details: Vec<(MetricKind, &str)>) -> SimulationRequest {
    SimulationRequest {
        equip_type: equip_type.to_string(),
        equip_id: "p1".to_string(),
        attributes,
        metric_details: details
            .into_iter()
            .map(|(metric_type, name)| MetricSimDetail {
                metric_type,
                metric_name: name.to_string(),
            })
            .collect(),
    }
}

/// Full override set for the processor attributes; `cores` carries the change.
fn processor_overrides(old_cores: f32, new_cores: f32) -> Vec<Attribute> {
    vec![
        override_attr(11, "cores", old_cores, new_cores),
        override_attr(12, "cpus", 1.0, 1.0),
        override_attr(13, "corefactor", 1.0, 1.0),
    ]
}

fn repo_with_definitions(definitions: Vec<MetricDefinition>) -> MockLicenseRepo {
    let mut repo = MockLicenseRepo::new();
    repo.expect_metric_definitions().returning(move |_| Ok(definitions.clone()));
    repo.expect_equipment_types().returning(|_| Ok(catalog()));
    repo
}

fn service(repo: MockLicenseRepo) -> HardwareSimulationServiceImpl {
    HardwareSimulationServiceImpl::builder().license_repo(Arc::new(repo)).build()
}

fn wire_ops_aggregation(repo: &mut MockLicenseRepo, old_total: i64, agg_ceiled: i64, agg_unceiled: f64) {
    repo.expect_equipment_chain().returning(|_, _, _, _| Ok(ancestry()));
    repo.expect_products_for_equipment().returning(|_, _, _, _, _| {
        Ok(vec![ProductData {
            swidtag: "oracle-db-19c".to_string(),
            name: "Oracle Database".to_string(),
            editor: "Oracle".to_string(),
        }])
    });
    repo.expect_equipment_licenses()
        .withf(|equip_id, equip_type, _, _| equip_id == "v1" && equip_type == "vcenter")
        .returning(move |_, _, _, _| Ok(old_total));
    repo.expect_equipment_licenses_full()
        .withf(|equip_id, equip_type, _, _| equip_id == "c1" && equip_type == "cluster")
        .returning(move |_, _, _, _| Ok((agg_ceiled, agg_unceiled)));
}

#[tokio::test]
async fn processor_tree_swaps_contribution_inside_aggregate_group() {
    let mut repo =
        repo_with_definitions(vec![MetricDefinition::Ops(ops_metric("ops"))]);
    wire_ops_aggregation(&mut repo, 350, 100, 100.5);

    // Contribution moves from 1x1x1 = 1.0 to 3x2x0.25 = 1.5.
    let overrides = vec![
        override_attr(11, "cores", 1.0, 3.0),
        override_attr(12, "cpus", 1.0, 2.0),
        override_attr(13, "corefactor", 1.0, 0.25),
    ];
    let req = request("partition", overrides, vec![(MetricKind::Ops, "ops")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    assert!(response.failures.is_empty());
    assert_eq!(response.metrics.len(), 1);
    let sim = &response.metrics[0];
    assert_eq!(sim.metric_kind, MetricKind::Ops);
    let license = &sim.licenses[0];
    assert_eq!(license.old_licenses, 350);
    assert_eq!(license.new_licenses, 351);
    assert_eq!(license.delta, 1);
}

#[tokio::test]
async fn unchanged_attributes_produce_zero_delta() {
    let mut repo =
        repo_with_definitions(vec![MetricDefinition::Ops(ops_metric("ops"))]);
    wire_ops_aggregation(&mut repo, 350, 100, 100.0);

    let req = request("partition", processor_overrides(1.0, 1.0), vec![(MetricKind::Ops, "ops")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    let license = &response.metrics[0].licenses[0];
    assert_eq!(license.old_licenses, 350);
    assert_eq!(license.new_licenses, 350);
    assert_eq!(license.delta, 0);
}

#[tokio::test]
async fn named_user_metric_scales_and_floors_the_swap() {
    let mut repo = repo_with_definitions(vec![MetricDefinition::Nup(MetricNup {
        ops: ops_metric("nup"),
        number_of_users: 10,
    })]);
    wire_ops_aggregation(&mut repo, 350, 100, 100.5);
    repo.expect_users_for_product().returning(|_, _, _, _, _, _| {
        Ok(vec![ProductUser { user_id: "u1".to_string(), user_count: 4000 }])
    });

    let req = request("partition", processor_overrides(1.0, 1.5), vec![(MetricKind::Nup, "nup")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    // 350/351 scale to 3500/3510, both floored by the 4000-user record.
    let license = &response.metrics[0].licenses[0];
    assert_eq!(license.old_licenses, 4000);
    assert_eq!(license.new_licenses, 4000);
    assert_eq!(license.delta, 0);
}

#[tokio::test]
async fn single_level_metric_uses_own_contribution() {
    let mut repo = repo_with_definitions(vec![MetricDefinition::Ips(MetricIps {
        id: Uuid::from_u128(101),
        name: "ips".to_string(),
        base_eq_type_id: Uuid::from_u128(1),
        core_factor_attr_id: Uuid::from_u128(13),
        num_core_attr_id: Uuid::from_u128(11),
    })]);
    repo.expect_products_for_equipment()
        .withf(|equip_id, equip_type, level_offset, _, _| {
            equip_id == "p1" && equip_type == "partition" && *level_offset == 1
        })
        .returning(|_, _, _, _, _| Ok(vec![ProductData::default()]));

    let overrides = vec![
        override_attr(11, "cores", 2.0, 4.0),
        override_attr(13, "corefactor", 0.5, 0.5),
    ];
    let req = request("partition", overrides, vec![(MetricKind::Ips, "ips")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    let license = &response.metrics[0].licenses[0];
    assert_eq!(license.old_licenses, 1);
    assert_eq!(license.new_licenses, 2);
    assert_eq!(license.delta, 1);
}

#[tokio::test]
async fn single_level_unchanged_attributes_produce_zero_delta() {
    let mut repo = repo_with_definitions(vec![
        MetricDefinition::Ips(MetricIps {
            id: Uuid::from_u128(101),
            name: "ips".to_string(),
            base_eq_type_id: Uuid::from_u128(1),
            core_factor_attr_id: Uuid::from_u128(13),
            num_core_attr_id: Uuid::from_u128(11),
        }),
        MetricDefinition::Sps(MetricSps {
            id: Uuid::from_u128(103),
            name: "sps".to_string(),
            base_eq_type_id: Uuid::from_u128(1),
            core_factor_attr_id: Uuid::from_u128(13),
            num_core_attr_id: Uuid::from_u128(11),
        }),
    ]);
    repo.expect_products_for_equipment()
        .returning(|_, _, _, _, _| Ok(vec![ProductData::default()]));

    let overrides = vec![
        override_attr(11, "cores", 2.0, 2.0),
        override_attr(13, "corefactor", 0.5, 0.5),
    ];
    let req =
        request("partition", overrides, vec![(MetricKind::Ips, "ips"), (MetricKind::Sps, "sps")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    assert_eq!(response.metrics.len(), 2);
    for sim in &response.metrics {
        assert_eq!(sim.licenses[0].delta, 0, "nonzero delta for {}", sim.metric_name);
    }
}

#[tokio::test]
async fn named_user_unchanged_attributes_produce_zero_delta() {
    let mut repo = repo_with_definitions(vec![MetricDefinition::Nup(MetricNup {
        ops: ops_metric("nup"),
        number_of_users: 10,
    })]);
    wire_ops_aggregation(&mut repo, 350, 100, 100.0);
    repo.expect_users_for_product().returning(|_, _, _, _, _, _| Err(RepoError::NoData));

    let req = request("partition", processor_overrides(1.0, 1.0), vec![(MetricKind::Nup, "nup")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    let license = &response.metrics[0].licenses[0];
    assert_eq!(license.old_licenses, 3500);
    assert_eq!(license.new_licenses, 3500);
    assert_eq!(license.delta, 0);
}

#[tokio::test]
async fn single_level_missing_equipment_is_an_empty_success() {
    let mut repo = repo_with_definitions(vec![MetricDefinition::Ips(MetricIps {
        id: Uuid::from_u128(101),
        name: "ips".to_string(),
        base_eq_type_id: Uuid::from_u128(1),
        core_factor_attr_id: Uuid::from_u128(13),
        num_core_attr_id: Uuid::from_u128(11),
    })]);
    // An absent equipment only means the products query matches nothing.
    repo.expect_products_for_equipment().returning(|_, _, _, _, _| Err(RepoError::NoData));

    let overrides = vec![
        override_attr(11, "cores", 2.0, 4.0),
        override_attr(13, "corefactor", 0.5, 0.5),
    ];
    let req = request("partition", overrides, vec![(MetricKind::Ips, "ips")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    assert!(response.failures.is_empty());
    assert_eq!(response.metrics.len(), 1);
    assert!(response.metrics[0].licenses.is_empty());
}

#[tokio::test]
async fn top_node_outside_the_tree_queries_level_offset_zero() {
    let mut repo =
        repo_with_definitions(vec![MetricDefinition::Ops(ops_metric("ops"))]);
    // The repository hands back one level more than the plan's tree covers.
    repo.expect_equipment_chain().returning(|_, _, _, _| {
        let mut nodes = ancestry().nodes;
        nodes.push(node("d1", "datacenter"));
        Ok(EquipmentChain::new(nodes))
    });
    repo.expect_products_for_equipment()
        .withf(|equip_id, _, level_offset, _, _| equip_id == "d1" && *level_offset == 0)
        .returning(|_, _, _, _, _| Ok(vec![ProductData::default()]));
    repo.expect_equipment_licenses()
        .withf(|equip_id, equip_type, _, _| equip_id == "d1" && equip_type == "datacenter")
        .returning(|_, _, _, _| Ok(350));
    repo.expect_equipment_licenses_full()
        .withf(|equip_id, _, _, _| equip_id == "c1")
        .returning(|_, _, _, _| Ok((100, 100.5)));

    let req = request("partition", processor_overrides(1.0, 1.5), vec![(MetricKind::Ops, "ops")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    assert_eq!(response.metrics[0].licenses[0].delta, 1);
}

#[tokio::test]
async fn missing_equipment_fails_the_whole_request() {
    let mut repo =
        repo_with_definitions(vec![MetricDefinition::Ops(ops_metric("ops"))]);
    repo.expect_equipment_chain().returning(|_, _, _, _| Err(RepoError::NotFound));

    let req = request("partition", processor_overrides(1.0, 1.5), vec![(MetricKind::Ops, "ops")]);
    let err = service(repo).simulate(&req, SCOPE).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NotFound);
    assert_eq!(err.to_string(), "equipment does not exist");
}

#[tokio::test]
async fn non_base_type_request_fails_only_that_metric() {
    let repo = repo_with_definitions(vec![MetricDefinition::Ops(ops_metric("ops"))]);

    let req = request("server", processor_overrides(1.0, 1.5), vec![(MetricKind::Ops, "ops")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    assert!(response.metrics.is_empty());
    assert_eq!(response.failures.len(), 1);
    assert_eq!(
        response.failures[0].reason,
        "cannot simulate OPS metric for types other than base type"
    );
}

#[tokio::test]
async fn unsupported_kind_is_a_per_metric_failure() {
    let repo = repo_with_definitions(vec![MetricDefinition::Acs(MetricAcs {
        id: Uuid::from_u128(102),
        name: "acs".to_string(),
        eq_type: "partition".to_string(),
        attr_name: "cores".to_string(),
        value: "8".to_string(),
    })]);

    let req = request("partition", vec![], vec![(MetricKind::Acs, "acs")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    assert!(response.metrics.is_empty());
    assert_eq!(response.failures[0].metric_name, "acs");
    assert_eq!(response.failures[0].reason, "metric type not supported for simulation");
}

#[tokio::test]
async fn node_without_products_is_an_empty_success() {
    let mut repo =
        repo_with_definitions(vec![MetricDefinition::Ops(ops_metric("ops"))]);
    repo.expect_equipment_chain().returning(|_, _, _, _| Ok(ancestry()));
    repo.expect_products_for_equipment().returning(|_, _, _, _, _| Err(RepoError::NoData));

    let req = request("partition", processor_overrides(1.0, 1.5), vec![(MetricKind::Ops, "ops")]);
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    assert!(response.failures.is_empty());
    assert_eq!(response.metrics.len(), 1);
    assert!(response.metrics[0].licenses.is_empty());
}

#[tokio::test]
async fn one_bad_metric_does_not_poison_the_others() {
    let mut repo = repo_with_definitions(vec![
        MetricDefinition::Ops(ops_metric("ops")),
        MetricDefinition::Acs(MetricAcs {
            id: Uuid::from_u128(102),
            name: "acs".to_string(),
            eq_type: "partition".to_string(),
            attr_name: "cores".to_string(),
            value: "8".to_string(),
        }),
    ]);
    wire_ops_aggregation(&mut repo, 350, 100, 100.5);

    let req = request(
        "partition",
        processor_overrides(1.0, 1.5),
        vec![(MetricKind::Ops, "ops"), (MetricKind::Acs, "acs"), (MetricKind::Ops, "ghost")],
    );
    let response = service(repo).simulate(&req, SCOPE).await.unwrap();

    assert_eq!(response.metrics.len(), 1);
    assert_eq!(response.failures.len(), 2);
    assert_eq!(response.failures[1].metric_name, "ghost");
    assert_eq!(response.failures[1].reason, "metric does not exist");
}
