use std::time::Instant;

use hedgehog_core::{Grid, generate_pit_grid, has_impasse};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    for size in 4..=12 {
        let stats = layout_stats(size, 2000, 42);
        println!(
            "Size {:>2}: {} layouts in {:>4} ms, pit frequency per cell {:.3}..{:.3} (expected {:.3})",
            size,
            stats.samples,
            stats.elapsed_ms,
            stats.min_frequency,
            stats.max_frequency,
            1.0 / size as f64
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LayoutStats {
    samples: usize,
    elapsed_ms: u128,
    min_frequency: f64,
    max_frequency: f64,
}

fn layout_stats(size: usize, samples: usize, seed: u64) -> LayoutStats {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = Grid::from_fn(size, size, |_| 0usize);
    let start = Instant::now();
    for _ in 0..samples {
        let grid = generate_pit_grid(size, &mut rng);
        validate(&grid).expect("Generated layout should be valid");
        for (pos, &is_pit) in grid.iter() {
            if is_pit {
                if let Ok(count) = counts.get_mut(pos) {
                    *count += 1;
                }
            }
        }
    }
    let elapsed_ms = start.elapsed().as_millis();
    let frequencies: Vec<f64> = counts
        .iter()
        .map(|(_, &count)| count as f64 / samples as f64)
        .collect();
    LayoutStats {
        samples,
        elapsed_ms,
        min_frequency: frequencies.iter().copied().fold(f64::INFINITY, f64::min),
        max_frequency: frequencies.iter().copied().fold(0.0, f64::max),
    }
}

fn validate(grid: &Grid<bool>) -> Result<(), String> {
    for row in 0..grid.rows() {
        let pits = grid.row(row).iter().filter(|&&p| p).count();
        if pits != 1 {
            return Err(format!("row {} has {} pits", row, pits));
        }
    }
    for col in 0..grid.cols() {
        let pits = grid.column(col).filter(|&&p| p).count();
        if pits != 1 {
            return Err(format!("column {} has {} pits", col, pits));
        }
    }
    if has_impasse(grid) {
        return Err("layout contains an impasse".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedgehog_core::Coord;

    #[test]
    fn test_layout_stats() {
        let stats = layout_stats(4, 500, 1);
        assert_eq!(stats.samples, 500);
        assert!(stats.min_frequency > 0.0);
        assert!(stats.max_frequency < 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        let diagonal = Grid::from_fn(4, 4, |pos: Coord| pos.row == pos.col);
        assert!(validate(&diagonal).is_err());
        let double = Grid::from_fn(4, 4, |pos: Coord| pos.col == 0);
        assert!(validate(&double).is_err());
    }
}
