//! Minimum-volume enclosing ellipsoid via Khachiyan's algorithm,
//! plus the small hand-rolled 3x3 symmetric eigendecomposition needed
//! to turn the algorithm's output matrix into semi-axes and radii.
//! Kept dependency-free in the same spirit as the hand-rolled
//! quaternion algebra in `qt.rs`.

use crate::vector3::Vector3;

const KHACHIYAN_TOLERANCE: f64 = 0.01;
const MAX_ITERATIONS: usize = 100;

#[derive(Debug, Clone, Copy)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

impl Matrix3 {
    pub fn zero() -> Self {
        Matrix3 { m: [[0.0; 3]; 3] }
    }

    pub fn identity() -> Self {
        let mut mat = Matrix3::zero();
        for i in 0..3 {
            mat.m[i][i] = 1.0;
        }
        mat
    }

    pub fn mul_vec(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    /// Jacobi eigenvalue algorithm for a symmetric 3x3 matrix. Returns
    /// eigenvalues and the corresponding orthonormal eigenvectors
    /// (columns of the returned rotation matrix).
    pub fn jacobi_eigen(&self) -> ([f64; 3], Matrix3) {
        let mut a = *self;
        let mut v = Matrix3::identity();

        for _ in 0..100 {
            // Find largest off-diagonal element
            let (mut p, mut q, mut max_val) = (0usize, 1usize, 0.0f64);
            for i in 0..3 {
                for j in (i + 1)..3 {
                    if a.m[i][j].abs() > max_val {
                        max_val = a.m[i][j].abs();
                        p = i;
                        q = j;
                    }
                }
            }
            if max_val < 1e-12 {
                break;
            }

            let theta = if (a.m[p][p] - a.m[q][q]).abs() < 1e-300 {
                std::f64::consts::FRAC_PI_4
            } else {
                0.5 * (2.0 * a.m[p][q] / (a.m[p][p] - a.m[q][q])).atan()
            };
            let (c, s) = (theta.cos(), theta.sin());

            let mut a_new = a;
            for i in 0..3 {
                a_new.m[i][p] = c * a.m[i][p] + s * a.m[i][q];
                a_new.m[i][q] = -s * a.m[i][p] + c * a.m[i][q];
            }
            a = a_new;
            let mut a_final = a;
            for j in 0..3 {
                a_final.m[p][j] = c * a.m[p][j] + s * a.m[q][j];
                a_final.m[q][j] = -s * a.m[p][j] + c * a.m[q][j];
            }
            a = a_final;

            let mut v_new = v;
            for i in 0..3 {
                v_new.m[i][p] = c * v.m[i][p] + s * v.m[i][q];
                v_new.m[i][q] = -s * v.m[i][p] + c * v.m[i][q];
            }
            v = v_new;
        }

        ([a.m[0][0], a.m[1][1], a.m[2][2]], v)
    }
}

#[derive(Debug, Clone)]
pub struct Ellipsoid {
    pub center: Vector3,
    pub a_matrix: Matrix3,
    pub semi_axes: [f64; 3],
    pub radii: [f64; 3],
}

/// Computes the minimum-volume enclosing ellipsoid of a point set via
/// Khachiyan's algorithm. Stops when the Khachiyan tolerance drops
/// below `KHACHIYAN_TOLERANCE` or after `MAX_ITERATIONS` iterations.
pub fn minimum_volume_ellipsoid(points: &[Vector3]) -> Ellipsoid {
    let n = points.len();
    let d = 3usize;
    assert!(n > d, "need more points than dimensions");

    // Lifted point matrix Q (d+1) x n, with a 1 appended per point.
    let mut q = vec![[0.0f64; 4]; n];
    for (i, p) in points.iter().enumerate() {
        q[i] = [p.x, p.y, p.z, 1.0];
    }

    let mut u = vec![1.0 / n as f64; n];
    let dim = (d + 1) as f64;

    for _ in 0..MAX_ITERATIONS {
        // X = Q^T diag(u) Q  (4x4)
        let mut x = [[0.0f64; 4]; 4];
        for (i, qi) in q.iter().enumerate() {
            for a in 0..4 {
                for b in 0..4 {
                    x[a][b] += u[i] * qi[a] * qi[b];
                }
            }
        }
        let x_inv = invert4(&x);

        // M_i = q_i^T X^-1 q_i
        let mut max_m = f64::MIN;
        let mut max_idx = 0;
        let mut m_values = vec![0.0; n];
        for (i, qi) in q.iter().enumerate() {
            let mut acc = 0.0;
            for a in 0..4 {
                let mut row = 0.0;
                for b in 0..4 {
                    row += x_inv[a][b] * qi[b];
                }
                acc += qi[a] * row;
            }
            m_values[i] = acc;
            if acc > max_m {
                max_m = acc;
                max_idx = i;
            }
        }

        let step_size = (max_m - dim - 1.0) / ((dim + 1.0) * (max_m - 1.0));
        if step_size.abs() < KHACHIYAN_TOLERANCE {
            break;
        }

        for (i, ui) in u.iter_mut().enumerate() {
            *ui *= 1.0 - step_size;
        }
        u[max_idx] += step_size;
    }

    // Center = sum(u_i * p_i)
    let mut center = Vector3::zero();
    for (i, p) in points.iter().enumerate() {
        center = center + *p * u[i];
    }

    // A = (1/d) * (P^T diag(u) P - center*center^T)^-1
    let mut p_cov = [[0.0f64; 3]; 3];
    for (i, p) in points.iter().enumerate() {
        let arr = p.as_array();
        for a in 0..3 {
            for b in 0..3 {
                p_cov[a][b] += u[i] * arr[a] * arr[b];
            }
        }
    }
    let c = center.as_array();
    let mut cov = Matrix3::zero();
    for a in 0..3 {
        for b in 0..3 {
            cov.m[a][b] = (p_cov[a][b] - c[a] * c[b]) / (d as f64);
        }
    }
    let a_matrix = invert3(&cov);

    let (eigenvalues, _) = a_matrix.jacobi_eigen();
    let mut semi_axes = [0.0; 3];
    let mut radii = [0.0; 3];
    for i in 0..3 {
        semi_axes[i] = 1.0 / eigenvalues[i].max(1e-12).sqrt();
        radii[i] = semi_axes[i];
    }

    Ellipsoid {
        center,
        a_matrix,
        semi_axes,
        radii,
    }
}

fn invert3(m: &Matrix3) -> Matrix3 {
    let a = m.m;
    let det = a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
        - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
        + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0]);
    let inv_det = 1.0 / det;

    let mut out = Matrix3::zero();
    out.m[0][0] = (a[1][1] * a[2][2] - a[1][2] * a[2][1]) * inv_det;
    out.m[0][1] = (a[0][2] * a[2][1] - a[0][1] * a[2][2]) * inv_det;
    out.m[0][2] = (a[0][1] * a[1][2] - a[0][2] * a[1][1]) * inv_det;
    out.m[1][0] = (a[1][2] * a[2][0] - a[1][0] * a[2][2]) * inv_det;
    out.m[1][1] = (a[0][0] * a[2][2] - a[0][2] * a[2][0]) * inv_det;
    out.m[1][2] = (a[0][2] * a[1][0] - a[0][0] * a[1][2]) * inv_det;
    out.m[2][0] = (a[1][0] * a[2][1] - a[1][1] * a[2][0]) * inv_det;
    out.m[2][1] = (a[0][1] * a[2][0] - a[0][0] * a[2][1]) * inv_det;
    out.m[2][2] = (a[0][0] * a[1][1] - a[0][1] * a[1][0]) * inv_det;
    out
}

/// Gauss-Jordan inversion of a 4x4 matrix; small and dependency-free,
/// used only by the Khachiyan iteration above.
fn invert4(a: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let mut aug = [[0.0f64; 8]; 4];
    for i in 0..4 {
        for j in 0..4 {
            aug[i][j] = a[i][j];
        }
        aug[i][4 + i] = 1.0;
    }

    for col in 0..4 {
        let mut pivot_row = col;
        for r in (col + 1)..4 {
            if aug[r][col].abs() > aug[pivot_row][col].abs() {
                pivot_row = r;
            }
        }
        aug.swap(col, pivot_row);

        let pivot = aug[col][col];
        for j in 0..8 {
            aug[col][j] /= pivot;
        }
        for r in 0..4 {
            if r != col {
                let factor = aug[r][col];
                for j in 0..8 {
                    aug[r][j] -= factor * aug[col][j];
                }
            }
        }
    }

    let mut out = [[0.0f64; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            out[i][j] = aug[i][4 + j];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_points(radius: f64, n: usize) -> Vec<Vector3> {
        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            let theta = (i as f64) * 2.399963229728653; // golden angle
            let z = 1.0 - 2.0 * (i as f64) / ((n - 1) as f64);
            let r = (1.0 - z * z).max(0.0).sqrt();
            points.push(Vector3::new(
                radius * r * theta.cos(),
                radius * r * theta.sin(),
                radius * z,
            ));
        }
        points
    }

    #[test]
    fn test_sphere_center_near_origin() {
        let points = sphere_points(5.0, 50);
        let ellipsoid = minimum_volume_ellipsoid(&points);
        assert!(ellipsoid.center.norm() < 0.5);
    }

    #[test]
    fn test_sphere_semi_axes_close_to_radius() {
        let points = sphere_points(5.0, 200);
        let ellipsoid = minimum_volume_ellipsoid(&points);
        for axis in ellipsoid.semi_axes {
            assert!((axis - 5.0).abs() < 1.0, "axis {} too far from 5.0", axis);
        }
    }

    #[test]
    fn test_invert3_identity() {
        let identity = Matrix3::identity();
        let inv = invert3(&identity);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((inv.m[i][j] - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_jacobi_eigen_of_diagonal() {
        let mut m = Matrix3::zero();
        m.m[0][0] = 2.0;
        m.m[1][1] = 3.0;
        m.m[2][2] = 4.0;
        let (eigenvalues, _) = m.jacobi_eigen();
        let mut sorted = eigenvalues;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((sorted[0] - 2.0).abs() < 1e-9);
        assert!((sorted[1] - 3.0).abs() < 1e-9);
        assert!((sorted[2] - 4.0).abs() < 1e-9);
    }
}
