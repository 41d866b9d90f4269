use nalgebra::Point3;

#[cfg(feature = "bse")]
use approx::assert_relative_eq;

use crate::basis::ao::{BasisShell, ShellOrder};
#[cfg(feature = "bse")]
use crate::basis::ao_integrals::BseBasisData;
use crate::basis::ao_integrals::{BasisSet, BasisShellContraction, GaussianContraction};

/// An STO-3G-like shell layout for water: O(1s, 2s, 2p) + 2 × H(1s).
fn water_sto3g_shells() -> Vec<Vec<BasisShellContraction<f64, f64>>> {
    let s_contraction = GaussianContraction::<f64, f64> {
        primitives: vec![(3.425_250_91, 0.154_328_97), (0.623_913_73, 0.535_328_14)],
    };
    let shell = |l: u32, origin: Point3<f64>| BasisShellContraction {
        basis_shell: BasisShell::new(l, ShellOrder::Cart),
        contraction: s_contraction.clone(),
        cart_origin: origin,
    };
    let o_origin = Point3::new(0.0, 0.0, 0.2217);
    let h1_origin = Point3::new(0.0, 1.4309, -0.8867);
    let h2_origin = Point3::new(0.0, -1.4309, -0.8867);
    vec![
        vec![
            shell(0, o_origin),
            shell(0, o_origin),
            shell(1, o_origin),
        ],
        vec![shell(0, h1_origin)],
        vec![shell(0, h2_origin)],
    ]
}

#[test]
fn test_basis_set_counts() {
    let bset = BasisSet::new(water_sto3g_shells());
    assert_eq!(bset.n_shells(), 5);
    assert_eq!(bset.n_funcs(), 7);
}

#[test]
fn test_basis_set_boundaries() {
    let bset = BasisSet::new(water_sto3g_shells());
    assert_eq!(
        bset.shell_boundaries(),
        &vec![(0, 1), (1, 2), (2, 5), (5, 6), (6, 7)]
    );
    assert_eq!(bset.atom_boundaries(), &vec![(0, 5), (5, 6), (6, 7)]);
}

/// An STO-3G-like payload for oxygen in the shape returned by the
/// BasisSetExchange REST API. The 1s shell carries a vanishing third
/// coefficient, and the second entry is a general sp contraction.
#[cfg(feature = "bse")]
const OXYGEN_STO3G_JSON: &str = r#"{
  "name": "STO-3G",
  "version": "1",
  "elements": {
    "8": {
      "electron_shells": [
        {
          "function_type": "gto",
          "region": "",
          "angular_momentum": [0],
          "exponents": ["0.130709320e+03", "0.238088661e+02", "0.644608313e+01"],
          "coefficients": [["0.154328967e+00", "0.535328142e+00", "0.0"]]
        },
        {
          "function_type": "gto",
          "region": "",
          "angular_momentum": [0, 1],
          "exponents": ["0.503315132e+01", "0.116959612e+01", "0.380389000e+00"],
          "coefficients": [
            ["-0.999672292e-01", "0.399512826e+00", "0.700115469e+00"],
            ["0.155916275e+00", "0.607683719e+00", "0.391957393e+00"]
          ]
        }
      ]
    }
  }
}"#;

#[cfg(feature = "bse")]
#[test]
fn test_basis_set_bse_payload_shells() {
    let data: BseBasisData = serde_yaml::from_str(OXYGEN_STO3G_JSON).unwrap();
    let shells = data.to_element_shells(8, false).unwrap();
    assert_eq!(shells.len(), 3);
    assert_eq!(shells[0].0.l, 0);
    assert_eq!(shells[1].0.l, 0);
    assert_eq!(shells[2].0.l, 1);

    // The vanishing third 1s coefficient is dropped from the contraction.
    assert_eq!(shells[0].1.contraction_length(), 2);
    assert_eq!(shells[1].1.contraction_length(), 3);
    assert_relative_eq!(shells[1].1.primitives[0].0, 5.03315132, epsilon = 1e-12);
    assert_relative_eq!(shells[2].1.primitives[0].1, 0.155916275, epsilon = 1e-12);

    let bset = BasisSet::new(vec![shells
        .into_iter()
        .map(|(basis_shell, contraction)| BasisShellContraction {
            basis_shell,
            contraction,
            cart_origin: Point3::origin(),
        })
        .collect::<Vec<_>>()]);
    assert_eq!(bset.n_shells(), 3);
    assert_eq!(bset.n_funcs(), 5);
}

#[cfg(feature = "bse")]
#[test]
fn test_basis_set_bse_payload_missing_element() {
    let data: BseBasisData = serde_yaml::from_str(OXYGEN_STO3G_JSON).unwrap();
    assert!(data.to_element_shells(6, false).is_err());
}

#[test]
fn test_basis_set_indexing() {
    let bset = BasisSet::new(water_sto3g_shells());
    assert_eq!(bset[2].basis_shell().l, 1);
    assert_eq!(bset[2].contraction_length(), 2);
    assert_eq!(bset[3].cart_origin()[1], 1.4309);
}
