//! Gradient (Perlin) noise with turbulence.

use lumen_math::Vec3;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::sampling::random_unit_vector;

const POINT_COUNT: usize = 256;

/// Perlin noise generator with random unit gradients and three
/// independently shuffled permutation tables.
#[derive(Clone, Debug)]
pub struct Perlin {
    ran_vec: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let ran_vec = (0..POINT_COUNT).map(|_| random_unit_vector(rng)).collect();

        Self {
            ran_vec,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Smooth noise in roughly `[-1, 1]`.
    pub fn noise(&self, p: Vec3) -> f32 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let idx = self.perm_x[wrap(i + di as i32)]
                        ^ self.perm_y[wrap(j + dj as i32)]
                        ^ self.perm_z[wrap(k + dk as i32)];
                    *corner = self.ran_vec[idx];
                }
            }
        }

        perlin_interp(&c, u, v, w)
    }

    /// Sum of `depth` octaves, each at double frequency and half weight.
    pub fn turb(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum
    }
}

#[inline]
fn wrap(i: i32) -> usize {
    (i & 255) as usize
}

fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut p: Vec<usize> = (0..POINT_COUNT).collect();
    p.shuffle(rng);
    p
}

/// Trilinear blend of the corner gradients with Hermite smoothing.
fn perlin_interp(c: &[[[Vec3; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in c.iter().enumerate() {
        let fi = i as f32;
        for (j, row) in plane.iter().enumerate() {
            let fj = j as f32;
            for (k, gradient) in row.iter().enumerate() {
                let fk = k as f32;
                let weight_v = Vec3::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * gradient.dot(weight_v);
            }
        }
    }
    accum
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn perlin() -> Perlin {
        Perlin::new(&mut StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_noise_is_zero_on_lattice_points() {
        // Gradient noise vanishes at integer coordinates.
        let p = perlin();
        assert!(p.noise(Vec3::new(3.0, -2.0, 7.0)).abs() < 1e-6);
    }

    #[test]
    fn test_noise_is_bounded_and_deterministic() {
        let a = perlin();
        let b = perlin();
        for i in 0..200 {
            let point = Vec3::new(i as f32 * 0.37, i as f32 * -0.11, i as f32 * 0.73);
            let n = a.noise(point);
            assert!(n.abs() <= 1.5);
            assert_eq!(n, b.noise(point));
        }
    }

    #[test]
    fn test_turb_single_octave_is_noise() {
        let p = perlin();
        let point = Vec3::new(1.3, 0.2, -4.6);
        assert_eq!(p.turb(point, 1), p.noise(point));
    }

    #[test]
    fn test_turb_zero_depth() {
        assert_eq!(perlin().turb(Vec3::new(0.3, 0.4, 0.5), 0), 0.0);
    }
}
