use crate::prelude::*;
use std::collections::VecDeque;

/// Alternating-inference chains over the link graph.
///
/// A chain alternates strong links ("one of these two is true") and weak
/// links ("not both are true"), starting and ending on a strong link. Its
/// two endpoints cannot both be false, so every candidate weakly linked to
/// both endpoints is eliminated. Strong links come from [`StrongLinks`],
/// derived fresh per invocation; weak links come straight from the graph, so
/// constraint links extend the chains automatically.
///
/// The search is a breadth-first walk over (candidate, polarity) states, so
/// the first chain found for an elimination is also a shortest one. Chains
/// are bounded to [`ChainFinder::max_length`] nodes.
#[derive(Debug)]
pub struct ChainFinder {
    max_length: usize,
}

const UNSEEN: usize = usize::MAX;

impl ChainFinder {
    pub fn new() -> Self {
        Self { max_length: 12 }
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    fn chain_string(cu: CellUtility, parent: &[usize], end_state: usize, start: usize) -> String {
        let mut nodes: Vec<(usize, bool)> = Vec::new();
        let mut state = end_state;
        while state != start * 2 && nodes.len() <= 64 {
            nodes.push((state / 2, state % 2 == 1));
            state = parent[state];
        }
        nodes.push((start, false));
        nodes.reverse();

        let mut text = String::new();
        for (index, &(node, via_strong)) in nodes.iter().enumerate() {
            if index > 0 {
                text.push(if via_strong { '=' } else { '-' });
            }
            text.push_str(&cu.candidate_index(node).to_string());
        }
        text
    }
}

impl Default for ChainFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicalStep for ChainFinder {
    fn name(&self) -> &'static str {
        "AIC"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let cu = board.cell_utility();
        let size = board.size();
        let num_candidates = board.num_candidates();
        let board_data = board.data();
        let strong = StrongLinks::from_board(board);

        let starts: Vec<usize> = (0..num_candidates)
            .filter(|&index| {
                let candidate = cu.candidate_index(index);
                strong.has_any(candidate) && board.has_candidate(candidate)
            })
            .collect();

        for &start in &starts {
            // One state per (candidate, polarity): even states are waiting
            // to take a strong link, odd states a weak link.
            let mut parent = vec![UNSEEN; num_candidates * 2];
            let mut node_count = vec![0usize; num_candidates * 2];
            let start_state = start * 2;
            parent[start_state] = start_state;
            node_count[start_state] = 1;

            let mut queue = VecDeque::new();
            queue.push_back(start_state);

            while let Some(state) = queue.pop_front() {
                if node_count[state] >= self.max_length {
                    continue;
                }
                let node = state / 2;

                if state % 2 == 0 {
                    for &next_candidate in strong.partners(cu.candidate_index(node)) {
                        if !board.has_candidate(next_candidate) {
                            continue;
                        }
                        let next = next_candidate.index();
                        let next_state = next * 2 + 1;
                        if parent[next_state] != UNSEEN {
                            continue;
                        }
                        parent[next_state] = state;
                        node_count[next_state] = node_count[state] + 1;

                        // The chain now ends on a strong link: anything
                        // seeing both endpoints is false.
                        let endpoint_rows = [
                            board_data.weak_links_for(cu.candidate_index(start)),
                            board_data.weak_links_for(next_candidate),
                        ];
                        let elims = CandidateLinks::common_of(size, endpoint_rows.into_iter())
                            .to_elimination_list(board);

                        if !elims.is_empty() {
                            let desc = generate_description.then(|| {
                                LogicalStepDesc::from_elims(
                                    &Self::chain_string(cu, &parent, next_state, start),
                                    &elims,
                                )
                            });
                            return match elims.execute(board) {
                                LogicResult::Invalid => LogicalStepResult::Invalid(desc),
                                _ => LogicalStepResult::Changed(desc),
                            };
                        }

                        queue.push_back(next_state);
                    }
                } else {
                    for next_candidate in board_data.weak_links_for(cu.candidate_index(node)).links()
                    {
                        let next = next_candidate.index();
                        if next == start
                            || !strong.has_any(next_candidate)
                            || !board.has_candidate(next_candidate)
                        {
                            continue;
                        }
                        let next_state = next * 2;
                        if parent[next_state] != UNSEEN {
                            continue;
                        }
                        parent[next_state] = state;
                        node_count[next_state] = node_count[state] + 1;
                        queue.push_back(next_state);
                    }
                }
            }
        }

        LogicalStepResult::None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_skyscraper_chain() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Column 1 holds 1 only in r2c1 and r8c1; column 5 only in r2c5 and
        // r7c5. The roof cells r2c1 and r2c5 share row 2.
        for row in 0..9 {
            if row != 1 && row != 7 {
                assert!(board.clear_value(cu.cell(row, 0), 1));
            }
            if row != 1 && row != 6 {
                assert!(board.clear_value(cu.cell(row, 4), 1));
            }
        }

        let result = ChainFinder::new().run(&mut board, true);
        assert!(result.is_changed());

        // Cells seeing both r8c1 and r7c5 lose the 1.
        for (row, col) in [(6, 1), (6, 2), (7, 3), (7, 5)] {
            assert!(
                !board.cell(cu.cell(row, col)).has(1),
                "1 should be gone from r{}c{}",
                row + 1,
                col + 1
            );
        }
        // The chain endpoints are untouched.
        assert!(board.cell(cu.cell(7, 0)).has(1));
        assert!(board.cell(cu.cell(6, 4)).has(1));

        let desc = result.to_string();
        assert!(desc.contains("=>"), "{}", desc);
    }

    #[test]
    fn test_no_chain_on_clean_board() {
        let mut board = Board::default();
        assert!(ChainFinder::new().run(&mut board, true).is_none());
        assert!(ChainFinder::with_max_length(6).run(&mut board, true).is_none());
    }
}
