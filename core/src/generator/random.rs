use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform placement driven by a seeded [`SmallRng`].
#[derive(Clone, Debug)]
pub struct RandomFruitPlacer {
    rng: SmallRng,
    policy: SpawnPolicy,
}

impl RandomFruitPlacer {
    pub fn new(seed: u64, policy: SpawnPolicy) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            policy,
        }
    }

    fn place_anywhere(&mut self, grid: GridSize) -> Option<Cell> {
        if grid.is_empty() {
            log::warn!("Cannot place fruit on an empty grid");
            return None;
        }
        let x = self.rng.random_range(0..grid.width);
        let y = self.rng.random_range(0..grid.height);
        Some(Cell::new(x, y))
    }

    fn place_free(&mut self, grid: GridSize, snake: &Snake) -> Option<Cell> {
        let mut occupied: Array2<bool> = Array2::default(grid.to_nd_shape());
        let mut free_cells = grid.total_cells();

        for segment in snake.body().filter(|&cell| grid.contains(cell)) {
            let slot = &mut occupied[segment.to_nd_index()];
            if !*slot {
                *slot = true;
                free_cells -= 1;
            }
        }

        if free_cells == 0 {
            log::warn!(
                "No free cell left for fruit, snake covers all {} cells",
                grid.total_cells()
            );
            return None;
        }

        // walk the mask in row-major order to the n-th free cell
        let mut remaining = self.rng.random_range(0..free_cells);
        for y in 0..grid.height {
            for x in 0..grid.width {
                let cell = Cell::new(x, y);
                if occupied[cell.to_nd_index()] {
                    continue;
                }
                if remaining == 0 {
                    return Some(cell);
                }
                remaining -= 1;
            }
        }

        log::error!("Free cell count mismatch while placing fruit");
        None
    }
}

impl FruitPlacer for RandomFruitPlacer {
    fn place(&mut self, grid: GridSize, snake: &Snake) -> Option<Cell> {
        match self.policy {
            SpawnPolicy::AnyCell => self.place_anywhere(grid),
            SpawnPolicy::AvoidSnake => self.place_free(grid, snake),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_snake(grid: GridSize, keep_free: usize) -> Snake {
        // snake covering the grid row by row, leaving the last `keep_free` cells open
        let covered = grid.total_cells() - keep_free;
        let cells = (0..grid.height)
            .flat_map(|y| (0..grid.width).map(move |x| Cell::new(x, y)))
            .take(covered);
        Snake::from_segments(cells, Direction::Right).unwrap()
    }

    #[test]
    fn placed_fruit_is_inside_the_grid() {
        let grid = GridSize::new(7, 3);
        let snake = Snake::new(Cell::new(1, 1), Direction::Right);

        for policy in [SpawnPolicy::AvoidSnake, SpawnPolicy::AnyCell] {
            let mut placer = RandomFruitPlacer::new(7, policy);
            for _ in 0..200 {
                let fruit = placer.place(grid, &snake).unwrap();
                assert!(grid.contains(fruit), "{fruit:?} outside {grid:?}");
            }
        }
    }

    #[test]
    fn avoid_snake_never_lands_on_the_body() {
        let grid = GridSize::new(4, 4);
        let snake = long_snake(grid, 3);
        let mut placer = RandomFruitPlacer::new(1234, SpawnPolicy::AvoidSnake);

        for _ in 0..100 {
            let fruit = placer.place(grid, &snake).unwrap();
            assert!(!snake.occupies(fruit));
        }
    }

    #[test]
    fn last_free_cell_is_found() {
        let grid = GridSize::new(5, 5);
        let snake = long_snake(grid, 1);
        let mut placer = RandomFruitPlacer::new(99, SpawnPolicy::AvoidSnake);

        assert_eq!(placer.place(grid, &snake), Some(Cell::new(4, 4)));
    }

    #[test]
    fn full_grid_has_no_place() {
        let grid = GridSize::new(3, 2);
        let snake = long_snake(grid, 0);
        let mut placer = RandomFruitPlacer::new(0, SpawnPolicy::AvoidSnake);

        assert_eq!(placer.place(grid, &snake), None);
        assert_eq!(
            RandomFruitPlacer::new(0, SpawnPolicy::AnyCell).place(GridSize::new(0, 0), &snake),
            None
        );
    }

    #[test]
    fn same_seed_same_sequence() {
        let grid = GridSize::new(30, 17);
        let snake = Snake::new(Cell::new(5, 5), Direction::Right);
        let mut a = RandomFruitPlacer::new(42, SpawnPolicy::AvoidSnake);
        let mut b = RandomFruitPlacer::new(42, SpawnPolicy::AvoidSnake);

        for _ in 0..20 {
            assert_eq!(a.place(grid, &snake), b.place(grid, &snake));
        }
    }
}
