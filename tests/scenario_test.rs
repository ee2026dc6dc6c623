// ==========================================
// 新店情景集成测试
// ==========================================
// 测试目标: 新店营业额、同品牌分流、品牌间影响
// ==========================================


use retail_sim::domain::{Location, ModelError, Store};
use retail_sim::engine::{GravityModel, ModelOrchestrator, ScenarioEngine};
use test_helpers::{assert_close, sample_network};

fn candidate() -> Store {
    Store::new("Tesco_new", "Tesco", Location::new(1200.0, 1300.0), 15000.0)
}

#[test]
fn test_new_store_keeps_total_revenue() {
    let network = sample_network();
    let model = GravityModel::default();
    let outcome = ScenarioEngine::new(&model)
        .evaluate_new_store(&network, candidate())
        .unwrap();

    assert_close(outcome.baseline.total_revenue(), network.total_expenditure(), 1e-9);
    assert_close(outcome.with_store.total_revenue(), network.total_expenditure(), 1e-9);
    assert_eq!(outcome.with_store.store_count(), network.stores().len() + 1);
    assert_eq!(outcome.network.stores().len(), network.stores().len() + 1);
}

#[test]
fn test_cannibalization_definition() {
    let network = sample_network();
    let model = GravityModel::default();
    let impact = ScenarioEngine::new(&model)
        .evaluate_new_store(&network, candidate())
        .unwrap()
        .impact;

    assert!(impact.store_revenue > 0.0);
    assert_close(
        impact.cannibalization,
        impact.brand_revenue_before + impact.store_revenue - impact.brand_revenue_after,
        1e-12,
    );
    // 分流来自同品牌既有门店,不超过新店营业额
    assert!(impact.cannibalization > 0.0);
    assert!(impact.cannibalization < impact.store_revenue);
    assert!(impact.brand_revenue_after > impact.brand_revenue_before);

    let trading = impact.trading_intensity.unwrap();
    assert_close(trading, impact.store_revenue / 15000.0, 1e-12);
}

#[test]
fn test_competitors_lose_revenue() {
    let network = sample_network();
    let model = GravityModel::default();
    let impact = ScenarioEngine::new(&model)
        .evaluate_new_store(&network, candidate())
        .unwrap()
        .impact;

    for b in impact.brand_impacts.iter().filter(|b| b.brand != "Tesco") {
        assert!(b.delta < 0.0, "{} should lose revenue", b.brand);
    }
    let net_delta: f64 = impact.brand_impacts.iter().map(|b| b.delta).sum();
    assert!(net_delta.abs() < 1e-6);
}

#[test]
fn test_catchment_covers_all_zones_descending() {
    let network = sample_network();
    let model = GravityModel::default();
    let impact = ScenarioEngine::new(&model)
        .evaluate_new_store(&network, candidate())
        .unwrap()
        .impact;

    assert_eq!(impact.catchment.len(), network.zones().len());
    assert!(impact.catchment.windows(2).all(|w| w[0].1 >= w[1].1));
    let total: f64 = impact.catchment.iter().map(|(_, f)| f).sum();
    assert_close(total, impact.store_revenue, 1e-9);
}

#[test]
fn test_evaluate_against_reuses_baseline() {
    let network = sample_network();
    let orchestrator = ModelOrchestrator::default();
    let baseline = orchestrator.model().compute_flows(&network).unwrap();

    let scenario = orchestrator.scenario();
    let a = scenario.evaluate_against(&network, &baseline, candidate()).unwrap();
    let b = scenario.evaluate_new_store(&network, candidate()).unwrap();
    assert_close(a.impact.store_revenue, b.impact.store_revenue, 1e-12);
}

#[test]
fn test_duplicate_candidate_name_rejected() {
    let network = sample_network();
    let model = GravityModel::default();
    let clash = Store::new("Asda_01", "Asda", Location::new(0.0, 0.0), 1000.0);
    let err = ScenarioEngine::new(&model)
        .evaluate_new_store(&network, clash)
        .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateId { ref id, .. } if id == "Asda_01"));
}
