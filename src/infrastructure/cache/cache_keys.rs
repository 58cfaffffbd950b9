pub fn settlement_plan_key(group_id: &str) -> String {
    format!("settlement_plan:{}", group_id)
}
