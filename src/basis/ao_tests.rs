use crate::basis::ao::{BasisShell, ShellOrder};

#[test]
fn test_basis_shell_n_funcs() {
    assert_eq!(BasisShell::new(0, ShellOrder::Cart).n_funcs(), 1);
    assert_eq!(BasisShell::new(0, ShellOrder::Pure).n_funcs(), 1);
    assert_eq!(BasisShell::new(1, ShellOrder::Cart).n_funcs(), 3);
    assert_eq!(BasisShell::new(1, ShellOrder::Pure).n_funcs(), 3);
    assert_eq!(BasisShell::new(2, ShellOrder::Cart).n_funcs(), 6);
    assert_eq!(BasisShell::new(2, ShellOrder::Pure).n_funcs(), 5);
    assert_eq!(BasisShell::new(3, ShellOrder::Cart).n_funcs(), 10);
    assert_eq!(BasisShell::new(3, ShellOrder::Pure).n_funcs(), 7);
}
