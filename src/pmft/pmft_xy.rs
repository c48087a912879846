use{
    crate::{
        compute::*,
        histogram::*,
        locality::*,
    },
    log::debug,
};

/// # Potential of mean force and torque in two dimensions
/// * every bond is expressed in the frame of its query point: the vector from
///   the query point to the point is rotated by minus the orientation of the query point
///   and binned on a regular grid over `[-x_max, x_max) × [-y_max, y_max)`.
///   Bonds outside of the grid are ignored
/// * the pair correlation function normalizes the counts by the ideal gas expectation
///   ```text
///   pcf[i] = counts[i] * (V / n_query_points) / (frames * n_points * dx * dy)
///   ```
///   where `V` is the area of the box of the last frame
/// * the PMFT is `-ln(pcf)`, infinite for empty bins
///
/// Only two dimensional boxes are supported.
/// Bins are row major, the x index varies slowest.
#[derive(Debug)]
pub struct PmftXY{
    base: BondHistogramCompute,
    pcf: Vec<f64>,
    x_max: f64,
    y_max: f64,
}

impl PmftXY
{
    /// # Create a new PMFT
    /// * `n_x` bins over `[-x_max, x_max)` and `n_y` bins over `[-y_max, y_max)`
    /// ## Errors
    /// * `InvalidParameter` if `x_max` or `y_max` is not positive and finite
    /// * `Hist(NoBins)` if `n_x` or `n_y` is zero
    pub fn new(x_max: f64, y_max: f64, n_x: usize, n_y: usize) -> Result<Self, ComputeError>
    {
        if !x_max.is_finite() || x_max <= 0.0 {
            return Err(ComputeError::InvalidParameter("x_max has to be positive and finite"));
        }
        if !y_max.is_finite() || y_max <= 0.0 {
            return Err(ComputeError::InvalidParameter("y_max has to be positive and finite"));
        }
        let axes = vec![
            AxisF64::new(n_x, -x_max, x_max)?,
            AxisF64::new(n_y, -y_max, y_max)?
        ];
        let base = BondHistogramCompute::new(axes)?;
        let pcf = vec![0.0; base.histogram().bin_count()];
        debug!("created PMFT with x_max={x_max}, y_max={y_max} and {n_x}x{n_y} bins");
        Ok(
            Self{
                base,
                pcf,
                x_max,
                y_max
            }
        )
    }

    /// Half width of the grid
    pub fn x_max(&self) -> f64
    {
        self.x_max
    }

    /// Half height of the grid
    pub fn y_max(&self) -> f64
    {
        self.y_max
    }

    /// # Smallest query radius that reaches every bin
    /// * distance to the corners of the grid
    pub fn r_max(&self) -> f64
    {
        self.x_max.hypot(self.y_max)
    }

    /// # Accumulate the bonds of one frame
    /// * `orientations[i]` is the angle of `query_points[i]`, counter clockwise in radians
    /// * bonds from `source` only select pairs, the displacements are recomputed from the
    ///   positions under the minimum image convention
    pub fn accumulate<'a, Q, S>(
        &mut self,
        query: &Q,
        orientations: &[f64],
        query_points: &[Point],
        source: S
    ) -> Result<(), ComputeError>
    where
        Q: NeighborQuery,
        S: Into<BondSource<'a>>
    {
        if !query.sim_box().is_2d() {
            return Err(ComputeError::InvalidParameter("PmftXY needs a two dimensional box"));
        }
        if orientations.len() != query_points.len() {
            return Err(
                ComputeError::LengthMismatch{
                    what: "orientations",
                    expected: query_points.len(),
                    got: orientations.len()
                }
            );
        }

        let sim_box = query.sim_box();
        self.base.accumulate_general(
            query,
            query_points,
            source.into(),
            |base, bond|
            {
                let delta = sim_box.displacement(
                    query_points[bond.query_point_index],
                    query.point(bond.point_index)
                );
                let (sin, cos) = (-orientations[bond.query_point_index]).sin_cos();
                let x = delta[0] * cos - delta[1] * sin;
                let y = delta[0] * sin + delta[1] * cos;
                if let Ok(bin) = base.histogram().checked_bin(&[x, y]) {
                    base.local_histograms().increment(bin);
                }
            }
        )
    }

    /// # Pair correlation function in the query point frame
    /// * one value per bin, row major
    pub fn pcf(&mut self) -> &[f64]
    {
        self.reduce_if_pending();
        &self.pcf
    }

    /// # Potential of mean force and torque
    /// * `-ln(pcf)`, `+∞` for bins without bonds
    pub fn pmf(&mut self) -> Vec<f64>
    {
        self.pcf()
            .iter()
            .map(|p| -p.ln())
            .collect()
    }
}

impl BondHistogram for PmftXY
{
    fn base(&self) -> &BondHistogramCompute
    {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BondHistogramCompute
    {
        &mut self.base
    }

    fn reduce(&mut self)
    {
        self.base.reduce_counts();
        let base = &self.base;
        let frames = base.frame_counter();
        let normalization = match base.sim_box() {
            Some(sim_box) if frames > 0 && base.n_points() > 0 && base.n_query_points() > 0 => {
                let axes = base.histogram().axes();
                let bin_area = axes[0].bin_width() * axes[1].bin_width();
                let inv_num_dens = sim_box.volume() / base.n_query_points() as f64;
                inv_num_dens / (frames as f64 * base.n_points() as f64 * bin_area)
            },
            _ => 0.0
        };
        self.pcf
            .iter_mut()
            .zip(base.histogram().values())
            .for_each(|(pcf, &count)| *pcf = f64::from(count) * normalization);
    }

    fn reset(&mut self)
    {
        self.base.reset();
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use rand::{Rng, SeedableRng, seq::SliceRandom};
    use rand_pcg::Pcg64;
    use std::f64::consts::FRAC_PI_2;

    /// grid of 6x6 bins of width one
    fn pmft() -> PmftXY
    {
        PmftXY::new(3.0, 3.0, 6, 6).unwrap()
    }

    #[test]
    fn invalid_parameters()
    {
        assert!(matches!(PmftXY::new(0.0, 1.0, 2, 2), Err(ComputeError::InvalidParameter(_))));
        assert!(matches!(PmftXY::new(1.0, -1.0, 2, 2), Err(ComputeError::InvalidParameter(_))));
        assert!(matches!(PmftXY::new(f64::INFINITY, 1.0, 2, 2), Err(ComputeError::InvalidParameter(_))));
        assert_eq!(PmftXY::new(1.0, 1.0, 0, 2).unwrap_err(), ComputeError::Hist(HistErrors::NoBins));

        let p = pmft();
        assert_eq!(p.shape(), vec![6, 6]);
        assert_eq!(p.r_max(), 3.0f64.hypot(3.0));
        assert_eq!(p.bin_centers()[0], vec![-2.5, -1.5, -0.5, 0.5, 1.5, 2.5]);
    }

    #[test]
    fn needs_2d_box()
    {
        let query = BruteForceQuery::new(SimulationBox::cube(10.0).unwrap(), vec![[0.0; 3]]);
        let mut p = pmft();
        let err = p.accumulate(&query, &[0.0], &[[0.0; 3]], QueryArgs::ball(1.0)).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidParameter(_)));

        let query = BruteForceQuery::new(SimulationBox::square(10.0).unwrap(), vec![[0.0; 3]]);
        let err = p.accumulate(&query, &[], &[[0.0; 3]], QueryArgs::ball(1.0)).unwrap_err();
        assert_eq!(err, ComputeError::LengthMismatch{what: "orientations", expected: 1, got: 0});
        assert_eq!(p.frame_counter(), 0);
    }

    #[test]
    fn bonds_are_rotated_into_query_frame()
    {
        let sim_box = SimulationBox::square(10.0).unwrap();
        // the second point is outside of the grid
        let query = BruteForceQuery::new(sim_box, vec![[1.5, 0.5, 0.0], [4.0, 0.0, 0.0]]);
        let query_points = [[0.0; 3]];

        let mut p = pmft();
        let args = QueryArgs::ball(p.r_max());
        p.accumulate(&query, &[0.0], &query_points, args).unwrap();
        let counts = p.bin_counts();
        assert_eq!(counts.iter().sum::<u32>(), 1);
        // x bin 4, y bin 3
        assert_eq!(counts[4 * 6 + 3], 1);

        p.reset();
        p.accumulate(&query, &[FRAC_PI_2], &query_points, args).unwrap();
        let counts = p.bin_counts();
        assert_eq!(counts.iter().sum::<u32>(), 1);
        // rotated to (0.5, -1.5): x bin 3, y bin 1
        assert_eq!(counts[3 * 6 + 1], 1);
    }

    #[test]
    fn displacements_use_minimum_image()
    {
        let sim_box = SimulationBox::square(10.0).unwrap();
        let query = BruteForceQuery::new(sim_box, vec![[9.5, 0.5, 0.0]]);
        let nlist = NeighborList::new(vec![NeighborBond::new(0, 0, 0.7)], 1, 1).unwrap();
        let mut p = pmft();
        p.accumulate(&query, &[0.0], &[[0.0; 3]], &nlist).unwrap();
        // (-0.5, 0.5)
        assert_eq!(p.bin_counts()[2 * 6 + 3], 1);
    }

    #[test]
    fn pcf_normalization()
    {
        let sim_box = SimulationBox::square(10.0).unwrap();
        let query = BruteForceQuery::new(sim_box, vec![[1.5, 0.5, 0.0]]);
        let mut p = pmft();
        let args = QueryArgs::ball(p.r_max());
        p.accumulate(&query, &[0.0], &[[0.0; 3]], args).unwrap();

        // area 100, one query point, one point, one frame, bins of area 1
        let pcf = p.pcf().to_vec();
        assert_eq!(pcf[4 * 6 + 3], 100.0);
        assert_eq!(pcf.iter().filter(|&&v| v != 0.0).count(), 1);

        let pmf = p.pmf();
        assert_eq!(pmf[4 * 6 + 3], -(100.0f64.ln()));
        assert_eq!(pmf[0], f64::INFINITY);

        // the same frame again leaves the pcf unchanged
        p.accumulate(&query, &[0.0], &[[0.0; 3]], args).unwrap();
        assert_eq!(p.bin_counts()[4 * 6 + 3], 2);
        assert_eq!(p.pcf(), pcf.as_slice());
        assert_eq!(p.reduction_count(), 2);

        p.reset();
        assert!(p.pcf().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn partitioning_does_not_matter()
    {
        let mut rng = Pcg64::seed_from_u64(9182736);
        let l = 12.0;
        let sim_box = SimulationBox::square(l).unwrap();
        let points: Vec<Point> = (0..300)
            .map(|_| [rng.random_range(0.0..l), rng.random_range(0.0..l), 0.0])
            .collect();
        let orientations: Vec<f64> = (0..points.len())
            .map(|_| rng.random_range(0.0..std::f64::consts::TAU))
            .collect();
        let query = BruteForceQuery::new(sim_box, points.clone());

        let mut reference = pmft();
        reference.set_parallelism(Parallelism::Sequential);
        let args = QueryArgs::ball(reference.r_max()).exclude_ii(true);
        reference.accumulate(&query, &orientations, &points, args).unwrap();
        let expected = reference.bin_counts().to_vec();
        assert!(expected.iter().sum::<u32>() > 0);

        let mut bonds = query.query_all(&points, &args).unwrap().bonds().to_vec();
        for threads in [1, 2, 4] {
            bonds.shuffle(&mut rng);
            let nlist = NeighborList::new(bonds.clone(), points.len(), points.len()).unwrap();
            let mut p = pmft();
            run_with_threads(
                threads,
                |parallelism| {
                    p.set_parallelism(parallelism);
                    p.accumulate(&query, &orientations, &points, &nlist)
                }
            ).unwrap().unwrap();
            assert_eq!(p.bin_counts(), expected.as_slice(), "threads={threads}");
        }
    }
}
