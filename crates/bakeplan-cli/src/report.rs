use bakeplan_solver::Solution;

/// The three summary lines for an optimal bakery plan.
pub fn summary(solution: &Solution) -> String {
    let (x, y) = (solution.values[0], solution.values[1]);
    format!(
        "Panes integrales: {:.0}\nPanes blancos: {:.0}\nGanancia máxima: ${:.2}",
        x, y, solution.objective_value
    )
}

/// Binding constraints and unused capacity
pub fn analysis(solution: &Solution) -> String {
    let mut out = String::new();

    if !solution.analysis.binding_constraints.is_empty() {
        out.push_str("Binding constraints (pinch points):\n");
        for name in &solution.analysis.binding_constraints {
            out.push_str(&format!("  - {}\n", name));
        }
        out.push('\n');
    }

    out.push_str("Resource usage:\n");
    for s in &solution.analysis.slacks {
        out.push_str(&format!(
            "  {:20} {:10.2} / {:10.2} (slack {:.2})\n",
            s.constraint, s.usage, s.capacity, s.slack
        ));
    }
    out
}
