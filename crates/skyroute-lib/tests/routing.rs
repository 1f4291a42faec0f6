use skyroute_lib::{
    plan_delivery, DeliveryRequest, Error, Graph, NodeRole, RouteRegistry,
};

fn charging_corridor() -> Graph {
    let mut graph = Graph::new();
    graph.add_vertex("S1", NodeRole::Storage);
    graph.add_vertex("C1", NodeRole::Charging);
    graph.add_vertex("T1", NodeRole::Client);
    graph.add_edge("S1", "C1", 9.0).expect("edge");
    graph.add_edge("C1", "T1", 9.0).expect("edge");
    graph
}

#[test]
fn planning_records_the_route_and_counts_repeats() {
    let graph = charging_corridor();
    let mut registry = RouteRegistry::new();
    let request = DeliveryRequest::new("S1", "T1", 10.0);

    let plan = plan_delivery(&graph, &mut registry, &request).expect("plan");
    assert_eq!(plan.steps, ["S1", "C1", "T1"]);
    assert_eq!(plan.hop_count(), 2);
    assert_eq!(plan.total_cost, 18.0);
    assert_eq!(plan.charging_stops, ["C1"]);
    assert_eq!(plan.frequency, 1);
    assert_eq!(plan.route_id.as_deref(), Some("R1"));

    let again = plan_delivery(&graph, &mut registry, &request).expect("plan");
    assert_eq!(again.frequency, 2);
    assert_eq!(again.route_id, plan.route_id);
    assert_eq!(registry.len(), 1, "one route entity for the repeat");

    let stats = registry.stats();
    assert_eq!(stats.unique_routes, 1);
    assert_eq!(stats.total_trips, 2);
    assert_eq!(stats.mean_frequency, 2.0);
}

#[test]
fn nonpositive_capacity_is_rejected() {
    let graph = charging_corridor();
    let mut registry = RouteRegistry::new();

    for capacity in [0.0, -4.0] {
        let request = DeliveryRequest::new("S1", "T1", capacity);
        let result = plan_delivery(&graph, &mut registry, &request);
        assert!(matches!(result, Err(Error::InvalidCapacity { .. })));
    }
    assert!(registry.is_empty());
}

#[test]
fn infeasible_delivery_leaves_the_registry_untouched() {
    let graph = charging_corridor();
    let mut registry = RouteRegistry::new();
    let request = DeliveryRequest::new("S1", "T1", 5.0);

    let result = plan_delivery(&graph, &mut registry, &request);
    assert!(matches!(result, Err(Error::NoViablePath { .. })));
    assert!(registry.is_empty());
}

#[test]
fn delivery_to_the_origin_is_not_recorded() {
    let graph = charging_corridor();
    let mut registry = RouteRegistry::new();
    let request = DeliveryRequest::new("S1", "S1", 10.0);

    let plan = plan_delivery(&graph, &mut registry, &request).expect("plan");
    assert_eq!(plan.steps, ["S1"]);
    assert_eq!(plan.route_id, None);
    assert_eq!(plan.total_cost, 0.0);
    assert!(registry.is_empty());
}

#[test]
fn legs_narrate_energy_and_recharges() {
    let graph = charging_corridor();
    let mut registry = RouteRegistry::new();
    let request = DeliveryRequest::new("S1", "T1", 10.0);

    let plan = plan_delivery(&graph, &mut registry, &request).expect("plan");
    let legs = plan.legs(&graph).expect("traversable");
    assert_eq!(legs.len(), 2);

    assert_eq!(legs[0].from, "S1");
    assert_eq!(legs[0].to, "C1");
    assert_eq!(legs[0].cost, 9.0);
    assert!(legs[0].recharged);
    assert_eq!(legs[0].energy_after, 10.0, "full capacity after the stop");

    assert_eq!(legs[1].from, "C1");
    assert_eq!(legs[1].to, "T1");
    assert!(!legs[1].recharged);
    assert_eq!(legs[1].energy_after, 1.0);
}

#[test]
fn plans_serialize_for_external_consumers() {
    let graph = charging_corridor();
    let mut registry = RouteRegistry::new();
    let request = DeliveryRequest::new("S1", "T1", 10.0);

    let plan = plan_delivery(&graph, &mut registry, &request).expect("plan");
    let json = serde_json::to_value(&plan).expect("serializable");
    assert_eq!(json["route_id"], "R1");
    assert_eq!(json["steps"][1], "C1");
    assert_eq!(json["frequency"], 1);
}
