use super::*;

#[test]
fn role_parses_cli_and_wire_spellings() {
    assert_eq!("loan-officer".parse::<Role>().unwrap(), Role::LoanOfficer);
    assert_eq!("LOAN_OFFICER".parse::<Role>().unwrap(), Role::LoanOfficer);
    assert_eq!(" auditor ".parse::<Role>().unwrap(), Role::Auditor);
    assert!("teller".parse::<Role>().is_err());
}

#[test]
fn every_role_round_trips_through_its_wire_form() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, format!("\"{}\"", role.as_str()));
    }
}

#[test]
fn only_customers_use_the_customer_portal() {
    assert_eq!(Role::Customer.portal(), Portal::Customer);
    for role in Role::ALL.into_iter().filter(|r| *r != Role::Customer) {
        assert_eq!(role.portal(), Portal::Employee, "{}", role);
    }
}

#[test]
fn portal_login_surfaces() {
    assert_eq!(Portal::Customer.login_surface(), "customer-login");
    assert_eq!(Portal::Employee.login_surface(), "employee-login");
    assert_eq!("Employee".parse::<Portal>().unwrap(), Portal::Employee);
    assert!("admin".parse::<Portal>().is_err());
}
