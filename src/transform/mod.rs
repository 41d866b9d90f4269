//! Basis transformations of one- and two-electron integrals.
//!
//! The two-electron transformation is the four-index integral transform
//!
//! ```math
//!     g'_{abcd} = \sum_{ijkl} g_{ijkl} C_{ia} C_{jb} C_{kc} C_{ld},
//! ```
//!
//! carried out as four sequential single-index contractions rather than one
//! direct eight-index summation, which reduces the cost from
//! $`\mathcal{O}(n^8)`$ to $`\mathcal{O}(4 n^5)`$. All operations here are
//! pure: inputs are borrowed immutably and a freshly allocated result is
//! returned.

use anyhow::{self, ensure, format_err};
use approx::abs_diff_eq;
use ndarray::{Array2, Array4, Ix4, LinalgScalar};
use ndarray_einsum_beta::einsum;


/// Threshold for the unitarity check in the rotation wrappers.
const UNITARITY_THRESHOLD: f64 = 1e-12;

/// Verifies that a two-electron tensor and a transformation matrix have
/// mutually consistent shapes.
///
/// # Arguments
///
/// * `tensor` - A rank-4 tensor of two-electron integrals.
/// * `cmat` - A transformation matrix.
///
/// # Returns
///
/// The common dimension $`n`$, or an error if `tensor` is not of shape
/// $`(n, n, n, n)`$ or `cmat` is not of shape $`(n, n)`$.
fn check_two_electron_shapes<A>(
    tensor: &Array4<A>,
    cmat: &Array2<A>,
) -> Result<usize, anyhow::Error> {
    let (n0, n1, n2, n3) = tensor.dim();
    ensure!(
        n0 == n1 && n1 == n2 && n2 == n3,
        "Two-electron tensor has inconsistent dimensions: ({n0}, {n1}, {n2}, {n3})."
    );
    ensure!(
        cmat.nrows() == cmat.ncols(),
        "Transformation matrix is not square: ({}, {}).",
        cmat.nrows(),
        cmat.ncols()
    );
    ensure!(
        cmat.nrows() == n0,
        "Transformation matrix dimensions ({}, {}) do not match two-electron tensor dimensions ({n0}, {n1}, {n2}, {n3}).",
        cmat.nrows(),
        cmat.ncols()
    );
    Ok(n0)
}

/// Contracts one index of a rank-4 tensor against the first index of a
/// transformation matrix, leaving the surviving index in the same position:
///
/// ```math
///     t'_{\ldots a \ldots} = \sum_{i} t_{\ldots i \ldots} C_{ia}.
/// ```
///
/// The intermediate is fully materialised before being returned.
///
/// # Arguments
///
/// * `tensor` - A rank-4 tensor of shape $`(n, n, n, n)`$.
/// * `cmat` - A transformation matrix of shape $`(n, n)`$.
/// * `axis` - The tensor index to be contracted (0 to 3).
///
/// # Returns
///
/// The contracted rank-4 tensor, or an error if the shapes are inconsistent or
/// `axis` is out of range.
pub fn contract_axis<A>(
    tensor: &Array4<A>,
    cmat: &Array2<A>,
    axis: usize,
) -> Result<Array4<A>, anyhow::Error>
where
    A: LinalgScalar,
{
    let n = check_two_electron_shapes(tensor, cmat)?;
    if n == 0 {
        return Ok(Array4::<A>::zeros((0, 0, 0, 0)));
    }
    let spec = match axis {
        0 => "ijkl,ia->ajkl",
        1 => "ijkl,jb->ibkl",
        2 => "ijkl,kc->ijcl",
        3 => "ijkl,ld->ijkd",
        _ => {
            return Err(format_err!(
                "Contraction axis {axis} out of range for a rank-4 tensor."
            ))
        }
    };
    einsum(spec, &[&tensor.view(), &cmat.view()])
        .map_err(|err| format_err!(err))
        .and_then(|t| {
            t.into_dimensionality::<Ix4>()
                .map_err(|err| format_err!(err))
        })
}

/// Transforms a rank-4 tensor of two-electron integrals from one basis to
/// another:
///
/// ```math
///     g'_{abcd} = \sum_{ijkl} g_{ijkl} C_{ia} C_{jb} C_{kc} C_{ld},
/// ```
///
/// where the transformation matrix $`\mathbf{C}`$ expresses the new basis in
/// terms of the old as $`\mathbf{B}' = \mathbf{B} \mathbf{C}`$ with the basis
/// functions collected in a row vector.
///
/// The four single-index contractions are performed sequentially on axes 0 to
/// 3; any other order would give the same result since the contracted index
/// pairs are distinct.
///
/// # Arguments
///
/// * `tensor` - A rank-4 tensor of shape $`(n, n, n, n)`$.
/// * `cmat` - A transformation matrix of shape $`(n, n)`$.
///
/// # Returns
///
/// The transformed rank-4 tensor of shape $`(n, n, n, n)`$, or an error if the
/// shapes are inconsistent.
pub fn transform_two_electron_integrals<A>(
    tensor: &Array4<A>,
    cmat: &Array2<A>,
) -> Result<Array4<A>, anyhow::Error>
where
    A: LinalgScalar,
{
    let mut transformed = contract_axis(tensor, cmat, 0)?;
    for axis in 1..4 {
        transformed = contract_axis(&transformed, cmat, axis)?;
    }
    Ok(transformed)
}

/// Transforms a matrix of one-electron integrals from one basis to another:
///
/// ```math
///     \mathbf{h}' = \mathbf{C}^{\mathsf{T}} \mathbf{h} \mathbf{C}.
/// ```
///
/// # Arguments
///
/// * `hmat` - A square matrix of one-electron integrals.
/// * `cmat` - A transformation matrix of matching dimensions.
///
/// # Returns
///
/// The transformed matrix, or an error if the shapes are inconsistent.
pub fn transform_one_electron_integrals<A>(
    hmat: &Array2<A>,
    cmat: &Array2<A>,
) -> Result<Array2<A>, anyhow::Error>
where
    A: LinalgScalar,
{
    ensure!(
        hmat.nrows() == hmat.ncols(),
        "One-electron integral matrix is not square: ({}, {}).",
        hmat.nrows(),
        hmat.ncols()
    );
    ensure!(
        cmat.nrows() == cmat.ncols(),
        "Transformation matrix is not square: ({}, {}).",
        cmat.nrows(),
        cmat.ncols()
    );
    ensure!(
        cmat.nrows() == hmat.nrows(),
        "Transformation matrix dimensions ({}, {}) do not match one-electron integral matrix dimensions ({}, {}).",
        cmat.nrows(),
        cmat.ncols(),
        hmat.nrows(),
        hmat.ncols()
    );
    Ok(cmat.t().dot(hmat).dot(cmat))
}

/// Checks whether a real matrix is unitary (orthogonal) to within
/// [`UNITARITY_THRESHOLD`].
fn is_unitary(umat: &Array2<f64>) -> bool {
    if umat.nrows() != umat.ncols() {
        return false;
    }
    umat.t().dot(umat).indexed_iter().all(|((i, j), v)| {
        abs_diff_eq!(
            *v,
            if i == j { 1.0 } else { 0.0 },
            epsilon = UNITARITY_THRESHOLD
        )
    })
}

/// Rotates a matrix of one-electron integrals by a unitary matrix
/// $`\mathbf{U}`$ expressing the basis rotation $`\mathbf{B}' = \mathbf{B}
/// \mathbf{U}`$.
///
/// # Arguments
///
/// * `hmat` - A square matrix of one-electron integrals.
/// * `umat` - A unitary transformation matrix.
///
/// # Returns
///
/// The rotated matrix, or an error if `umat` is not unitary or the shapes are
/// inconsistent.
pub fn rotate_one_electron_integrals(
    hmat: &Array2<f64>,
    umat: &Array2<f64>,
) -> Result<Array2<f64>, anyhow::Error> {
    ensure!(
        is_unitary(umat),
        "The given transformation matrix is not unitary."
    );
    transform_one_electron_integrals(hmat, umat)
}

/// Rotates a rank-4 tensor of two-electron integrals by a unitary matrix
/// $`\mathbf{U}`$ expressing the basis rotation $`\mathbf{B}' = \mathbf{B}
/// \mathbf{U}`$.
///
/// # Arguments
///
/// * `tensor` - A rank-4 tensor of two-electron integrals.
/// * `umat` - A unitary transformation matrix.
///
/// # Returns
///
/// The rotated tensor, or an error if `umat` is not unitary or the shapes are
/// inconsistent.
pub fn rotate_two_electron_integrals(
    tensor: &Array4<f64>,
    umat: &Array2<f64>,
) -> Result<Array4<f64>, anyhow::Error> {
    ensure!(
        is_unitary(umat),
        "The given transformation matrix is not unitary."
    );
    transform_two_electron_integrals(tensor, umat)
}

/// Constructs the `dim`-dimensional Jacobi rotation matrix for the orbital
/// pair $`(p, q)`$, $`p < q`$, and angle $`\theta`$:
///
/// ```math
///     J_{pp} = \cos\theta, \quad
///     J_{pq} = \sin\theta, \quad
///     J_{qp} = -\sin\theta, \quad
///     J_{qq} = \cos\theta,
/// ```
///
/// with all other elements those of the identity.
///
/// # Arguments
///
/// * `p` - The first orbital index (zero-based).
/// * `q` - The second orbital index (zero-based), strictly greater than `p`.
/// * `theta` - The rotation angle in radians.
/// * `dim` - The dimension of the rotation matrix.
///
/// # Returns
///
/// The Jacobi rotation matrix, or an error if the orbital indices are invalid.
pub fn jacobi_rotation_matrix(
    p: usize,
    q: usize,
    theta: f64,
    dim: usize,
) -> Result<Array2<f64>, anyhow::Error> {
    ensure!(p < q, "Jacobi orbital indices must satisfy p < q; got p = {p}, q = {q}.");
    ensure!(
        q < dim,
        "Jacobi orbital index q = {q} out of range for dimension {dim}."
    );
    let (sin, cos) = theta.sin_cos();
    let mut jmat = Array2::<f64>::eye(dim);
    jmat[(p, p)] = cos;
    jmat[(p, q)] = sin;
    jmat[(q, p)] = -sin;
    jmat[(q, q)] = cos;
    Ok(jmat)
}

/// Transforms a matrix of one-electron integrals by a Jacobi rotation with
/// angle `theta` of the orbitals `p` and `q`.
///
/// # Arguments
///
/// * `hmat` - A square matrix of one-electron integrals.
/// * `p` - The first orbital index (zero-based).
/// * `q` - The second orbital index (zero-based), strictly greater than `p`.
/// * `theta` - The rotation angle in radians.
///
/// # Returns
///
/// The rotated matrix, or an error if the orbital indices are invalid.
pub fn rotate_one_electron_integrals_jacobi(
    hmat: &Array2<f64>,
    p: usize,
    q: usize,
    theta: f64,
) -> Result<Array2<f64>, anyhow::Error> {
    let jmat = jacobi_rotation_matrix(p, q, theta, hmat.nrows())?;
    transform_one_electron_integrals(hmat, &jmat)
}

/// Transforms a rank-4 tensor of two-electron integrals by a Jacobi rotation
/// with angle `theta` of the orbitals `p` and `q`.
///
/// # Arguments
///
/// * `tensor` - A rank-4 tensor of two-electron integrals.
/// * `p` - The first orbital index (zero-based).
/// * `q` - The second orbital index (zero-based), strictly greater than `p`.
/// * `theta` - The rotation angle in radians.
///
/// # Returns
///
/// The rotated tensor, or an error if the orbital indices are invalid.
pub fn rotate_two_electron_integrals_jacobi(
    tensor: &Array4<f64>,
    p: usize,
    q: usize,
    theta: f64,
) -> Result<Array4<f64>, anyhow::Error> {
    let jmat = jacobi_rotation_matrix(p, q, theta, tensor.dim().0)?;
    transform_two_electron_integrals(tensor, &jmat)
}
