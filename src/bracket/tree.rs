use crate::bracket::Inconsistency;
use crate::models::matches::Match;
use std::collections::HashMap;

/// The "winner goes to" graph over a tournament's matches.
///
/// Matches live in one arena in bracket order and every edge is an index into it, so walking
/// either direction never has to go back to the ids.
#[derive(Debug, Clone)]
pub struct BracketTree {
    matches: Vec<Match>,
    index: HashMap<String, usize>,
    next: Vec<Option<usize>>,
}

impl BracketTree {
    /// Builds the graph out of `links` (match id -> next match id), keeping whatever it can.
    /// Links to matches that aren't in `matches` are dropped and come back as problems.
    pub fn build(
        mut matches: Vec<Match>,
        links: &HashMap<String, String>,
    ) -> (Self, Vec<Inconsistency>) {
        matches.sort_by(Match::bracket_cmp);
        let index = matches
            .iter()
            .enumerate()
            .map(|(i, m)| (m.match_id.clone(), i))
            .collect::<HashMap<_, _>>();
        let mut problems = vec![];
        let next = matches
            .iter()
            .map(|m| {
                let target = links.get(&m.match_id)?;
                let found = index.get(target).copied();
                if found.is_none() {
                    problems.push(Inconsistency::NextMatchOutsideTournament {
                        match_id: m.match_id.clone(),
                        next_match_id: target.clone(),
                    });
                }
                found
            })
            .collect();
        (
            Self {
                matches,
                index,
                next,
            },
            problems,
        )
    }

    /// like [BracketTree::build] but refuses a graph with dangling links
    pub fn new(
        matches: Vec<Match>,
        links: &HashMap<String, String>,
    ) -> Result<Self, Inconsistency> {
        let (tree, problems) = Self::build(matches, links);
        match problems.into_iter().next() {
            Some(p) => Err(p),
            None => Ok(tree),
        }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// every match, in bracket order
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, match_id: &str) -> Option<&Match> {
        self.index.get(match_id).map(|i| &self.matches[*i])
    }

    /// the match this one's winner advances to
    pub fn successor(&self, match_id: &str) -> Option<&Match> {
        let i = *self.index.get(match_id)?;
        self.next[i].map(|n| &self.matches[n])
    }

    /// the matches whose winners advance into this one, in bracket order
    pub fn feeders(&self, match_id: &str) -> Vec<&Match> {
        let Some(&target) = self.index.get(match_id) else {
            return vec![];
        };
        self.next
            .iter()
            .enumerate()
            .filter(|(_, n)| **n == Some(target))
            .map(|(i, _)| &self.matches[i])
            .collect()
    }

    /// matches nobody advances out of. a normal bracket has exactly one.
    pub fn finals(&self) -> Vec<&Match> {
        self.next
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_none())
            .map(|(i, _)| &self.matches[i])
            .collect()
    }

    /// Every loop in the graph, each reported once and rotated to start at its smallest id.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        const UNSEEN: u8 = 0;
        const ON_PATH: u8 = 1;
        const DONE: u8 = 2;

        // every node has at most one outgoing edge, so a plain walk finds each loop
        let mut state = vec![UNSEEN; self.matches.len()];
        let mut cycles = vec![];
        for start in 0..self.matches.len() {
            if state[start] != UNSEEN {
                continue;
            }
            let mut path = vec![];
            let mut cur = Some(start);
            while let Some(i) = cur {
                match state[i] {
                    UNSEEN => {
                        state[i] = ON_PATH;
                        path.push(i);
                        cur = self.next[i];
                    }
                    ON_PATH => {
                        if let Some(pos) = path.iter().position(|p| *p == i) {
                            cycles.push(self.canonical_cycle(&path[pos..]));
                        }
                        break;
                    }
                    _ => break,
                }
            }
            for i in path {
                state[i] = DONE;
            }
        }
        cycles.sort();
        cycles
    }

    fn canonical_cycle(&self, members: &[usize]) -> Vec<String> {
        let ids = members
            .iter()
            .map(|i| self.matches[*i].match_id.clone())
            .collect::<Vec<_>>();
        let smallest = ids
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut rotated = ids;
        rotated.rotate_left(smallest);
        rotated
    }

    /// Links that don't move forward a round. Matches without a round order can't be checked and
    /// are skipped.
    pub fn round_order_violations(&self) -> Vec<Inconsistency> {
        self.next
            .iter()
            .enumerate()
            .filter_map(|(i, n)| {
                let from = &self.matches[i];
                let to = &self.matches[(*n)?];
                match (from.round_order, to.round_order) {
                    (Some(a), Some(b)) if b <= a => Some(Inconsistency::NextMatchNotLater {
                        match_id: from.match_id.clone(),
                        next_match_id: to.match_id.clone(),
                    }),
                    _ => None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::BracketTree;
    use crate::bracket::Inconsistency;
    use crate::models::matches::Match;
    use std::collections::HashMap;

    fn m(id: &str, round_order: Option<i32>, bracket_order: i32) -> Match {
        Match {
            match_id: id.to_string(),
            round: None,
            round_order,
            bracket_order: Some(bracket_order),
            tournament_id: "t".to_string(),
        }
    }

    fn links(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn ids(ms: Vec<&Match>) -> Vec<&str> {
        ms.into_iter().map(|m| m.match_id.as_str()).collect()
    }

    /// 8 man bracket: quarters -> semis -> final
    fn eight_man() -> (Vec<Match>, HashMap<String, String>) {
        let matches = vec![
            m("final", Some(3), 1),
            m("sf2", Some(2), 2),
            m("sf1", Some(2), 1),
            m("qf4", Some(1), 4),
            m("qf3", Some(1), 3),
            m("qf2", Some(1), 2),
            m("qf1", Some(1), 1),
        ];
        let links = links(&[
            ("qf1", "sf1"),
            ("qf2", "sf1"),
            ("qf3", "sf2"),
            ("qf4", "sf2"),
            ("sf1", "final"),
            ("sf2", "final"),
        ]);
        (matches, links)
    }

    #[test]
    fn test_navigation() -> Result<(), Inconsistency> {
        let (matches, links) = eight_man();
        let tree = BracketTree::new(matches, &links)?;
        assert_eq!(7, tree.len());
        assert!(!tree.is_empty());
        assert_eq!(
            vec!["qf1", "qf2", "qf3", "qf4", "sf1", "sf2", "final"],
            tree.matches()
                .iter()
                .map(|m| m.match_id.as_str())
                .collect::<Vec<_>>()
        );
        assert_eq!(Some("sf2"), tree.successor("qf3").map(|m| m.match_id.as_str()));
        assert_eq!(None, tree.successor("final").map(|m| m.match_id.as_str()));
        assert_eq!(None, tree.successor("nope").map(|m| m.match_id.as_str()));
        assert_eq!(vec!["sf1", "sf2"], ids(tree.feeders("final")));
        assert!(tree.feeders("qf1").is_empty());
        assert_eq!(vec!["final"], ids(tree.finals()));
        assert_eq!(Some(3), tree.get("final").and_then(|m| m.round_order));
        assert!(tree.find_cycles().is_empty());
        assert!(tree.round_order_violations().is_empty());
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<(), Inconsistency> {
        let tree = BracketTree::new(vec![], &HashMap::new())?;
        assert!(tree.is_empty());
        assert!(tree.finals().is_empty());
        assert!(tree.find_cycles().is_empty());
        Ok(())
    }

    #[test]
    fn test_link_outside_tournament() {
        let (matches, mut links) = eight_man();
        links.insert("final".to_string(), "elsewhere".to_string());
        let expected = Inconsistency::NextMatchOutsideTournament {
            match_id: "final".to_string(),
            next_match_id: "elsewhere".to_string(),
        };
        assert_eq!(Err(expected.clone()), BracketTree::new(matches.clone(), &links).map(|_| ()));

        let (tree, problems) = BracketTree::build(matches, &links);
        assert_eq!(vec![expected], problems);
        // the bad link is dropped, everything else is kept
        assert_eq!(vec!["final"], ids(tree.finals()));
        assert_eq!(vec!["sf1", "sf2"], ids(tree.feeders("final")));
    }

    #[test]
    fn test_cycles_are_reported_once() -> Result<(), Inconsistency> {
        let (mut matches, mut links) = eight_man();
        links.insert("final".to_string(), "sf1".to_string());
        matches.push(m("loop-b", None, 9));
        matches.push(m("loop-a", None, 8));
        links.insert("loop-b".to_string(), "loop-a".to_string());
        links.insert("loop-a".to_string(), "loop-b".to_string());
        let tree = BracketTree::new(matches, &links)?;
        assert_eq!(
            vec![
                vec!["final".to_string(), "sf1".to_string()],
                vec!["loop-a".to_string(), "loop-b".to_string()],
            ],
            tree.find_cycles()
        );
        assert!(tree.finals().is_empty());
        Ok(())
    }

    #[test]
    fn test_self_loop() -> Result<(), Inconsistency> {
        let matches = vec![m("a", Some(1), 1)];
        let tree = BracketTree::new(matches, &links(&[("a", "a")]))?;
        assert_eq!(vec![vec!["a".to_string()]], tree.find_cycles());
        assert_eq!(
            vec![Inconsistency::NextMatchNotLater {
                match_id: "a".to_string(),
                next_match_id: "a".to_string(),
            }],
            tree.round_order_violations()
        );
        Ok(())
    }

    #[test]
    fn test_round_order_violations_skip_unordered() -> Result<(), Inconsistency> {
        let matches = vec![
            m("a", Some(2), 1),
            m("b", Some(2), 2),
            m("c", None, 1),
            m("d", Some(3), 1),
        ];
        let links = links(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let tree = BracketTree::new(matches, &links)?;
        assert_eq!(
            vec![Inconsistency::NextMatchNotLater {
                match_id: "a".to_string(),
                next_match_id: "b".to_string(),
            }],
            tree.round_order_violations()
        );
        Ok(())
    }
}
