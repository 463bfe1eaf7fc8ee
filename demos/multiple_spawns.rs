use spawn_pathfinding::pathing_grid::PathingGrid;
use spawn_pathfinding::terrain::filled;
use spawn_pathfinding::{path_cost, PathFinder, Point, SolverKind, TerrainType};

// In this example three spawn points share one destination on a 7x5 map with shape
//  _______
// |S.....G|
// |...#...|
// |S..#...|
// |...#...|
// |S......|
//  _______
// where
// - # marks a wall
// - S marks a spawn point
// - G marks the destination
// Every solver returns paths of equal cost; the solver can be chosen on the command line.

fn main() {
    let kind: SolverKind = std::env::args()
        .nth(1)
        .map(|name| name.parse().unwrap())
        .unwrap_or(SolverKind::ReverseDijkstra);

    let (width, height) = (7, 5);
    let mut terrain = filled(width, height, TerrainType::Road);
    for y in 1..4 {
        terrain[3][y] = TerrainType::Wall;
    }
    let spawns = vec![Point::new(0, 0), Point::new(0, 2), Point::new(0, 4)];
    for spawn in &spawns {
        terrain[spawn.x as usize][spawn.y as usize] = TerrainType::SpawnPoint;
    }
    let destination = Point::new(6, 4);
    terrain[6][4] = TerrainType::Destination;
    println!("{}", PathingGrid::from_terrain(width, height, &terrain).unwrap());

    let mut path_finder = PathFinder::with_solver(kind);
    path_finder
        .set_map_data(width, height, &terrain, destination)
        .unwrap();
    let paths = path_finder.find_paths(&spawns, destination).unwrap();
    for (spawn, path) in spawns.iter().zip(paths) {
        println!("Path from {:?} using {} (cost {}):", spawn, kind, path_cost(&path));
        for p in path {
            println!("{:?}", p);
        }
    }
}
