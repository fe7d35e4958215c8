use polyslice::polygon::Polygon;

/// Cycles all the vertex index positions forward by `n`, index 0 becomes 1 and the last index
/// becomes 0 for `n = 1`.
pub fn cycle_start_index_forward(input: &Polygon<f64>, n: usize) -> Polygon<f64> {
    assert!(n > 0, "cycling forward by 0 just returns the same polygon");
    assert!(
        n < input.vertex_count(),
        "cycling forward by more than the vertex count is unnecessary"
    );
    input
        .vertexes()
        .iter()
        .cycle()
        .skip(input.vertex_count() - n)
        .take(input.vertex_count())
        .copied()
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct ModifiedPgonState {
    pub inverted_direction: bool,
    pub cycle_position: usize,
}

/// Visit `input` with every start vertex in both windings.
///
/// Clip and split results must not depend on where a polygon starts or which way it winds.
pub fn for_each_modified<F>(input: &Polygon<f64>, mut visitor: F)
where
    F: FnMut(Polygon<f64>, ModifiedPgonState),
{
    for inverted_direction in [false, true] {
        let base = if inverted_direction {
            input.reversed()
        } else {
            input.clone()
        };

        visitor(
            base.clone(),
            ModifiedPgonState {
                inverted_direction,
                cycle_position: 0,
            },
        );

        for cycle_position in 1..base.vertex_count() {
            visitor(
                cycle_start_index_forward(&base, cycle_position),
                ModifiedPgonState {
                    inverted_direction,
                    cycle_position,
                },
            );
        }
    }
}
