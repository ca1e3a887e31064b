use super::*;

#[test]
fn encode_pairs_keeps_order_and_escapes() {
    assert_eq!(
        encode_pairs([("action", "add_leave"), ("reason", "family & health"), ("days", "3")]),
        "action=add_leave&reason=family+%26+health&days=3"
    );
}

#[test]
fn encode_pairs_of_nothing_is_empty() {
    assert_eq!(encode_pairs(std::iter::empty()), "");
}

#[test]
fn employees_lookup_url_formats_expected_path() {
    assert_eq!(
        employees_lookup_url("/hr/employees_by_duty_station", "5"),
        "/hr/employees_by_duty_station?duty_station_id=5"
    );
}

#[test]
fn employees_lookup_url_escapes_id() {
    assert_eq!(
        employees_lookup_url("/hr/employees_by_duty_station", "5&x=1"),
        "/hr/employees_by_duty_station?duty_station_id=5%26x%3D1"
    );
}

#[test]
fn delete_body_carries_action_id_and_token() {
    assert_eq!(
        delete_employee_body("12", Some("tok/en")),
        "action=delete_employee&employee_id=12&csrf_token=tok%2Fen"
    );
}

#[test]
fn delete_body_omits_missing_token() {
    assert_eq!(delete_employee_body("12", None), "action=delete_employee&employee_id=12");
}
