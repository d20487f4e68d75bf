//! Built-in question catalog shown on a fresh session

use stackit_domain::Tag;

/// Author of every seeded question
pub const SEED_AUTHOR: &str = "Admin";

/// Seeded questions as `(title, description, tags)` in display order
pub const SEED_QUESTIONS: &[(&str, &str, &[Tag])] = &[
    ("What is recursion?", "How does recursion work and where is it useful?", &[Tag::Recursion]),
    ("Difference between Array and Linked List?", "Which one is better for insertions?", &[Tag::Array, Tag::LinkedList]),
    ("What is Dynamic Programming?", "How is it different from recursion?", &[Tag::Dp]),
    ("Explain Hash Tables", "How do hash functions work?", &[Tag::Hashing]),
    ("What is a Graph?", "Explain BFS and DFS with use-cases.", &[Tag::Graph]),
    ("Sorting Algorithms", "Compare Merge Sort and Quick Sort.", &[Tag::Sorting]),
    ("What is Backtracking?", "How is it used in N-Queens problem?", &[Tag::Recursion]),
    ("Best data structure for LRU cache?", "How to implement LRU efficiently?", &[Tag::Hashing, Tag::LinkedList]),
    ("When to use Dynamic Programming?", "Identify DP from problem statement.", &[Tag::Dp]),
    ("Difference between Stack and Queue?", "When to use which one?", &[Tag::Array]),
    ("Advantages of Linked Lists", "Over arrays and when to use them?", &[Tag::LinkedList]),
    ("Cycle detection in Graph", "Using DFS and Union-Find approach.", &[Tag::Graph]),
    ("Heap vs Binary Search Tree", "Which is better for priority queue?", &[Tag::Sorting]),
    ("Kadane’s Algorithm", "How to find max subarray sum?", &[Tag::Dp]),
    ("What is a Trie?", "Explain trie data structure and usage.", &[Tag::Hashing]),
    ("Quick Sort worst case?", "Explain pivot strategies to avoid it.", &[Tag::Sorting]),
    ("What is Topological Sort?", "Use-cases of topological ordering.", &[Tag::Graph]),
    ("Sliding Window Technique", "When and how to apply it?", &[Tag::Array]),
    ("Two Pointer Technique", "Explain its application in problems.", &[Tag::Array]),
    ("Floyd’s Cycle Detection", "Detect cycle in linked list.", &[Tag::LinkedList]),
    ("0/1 Knapsack Problem", "Classic DP approach explained.", &[Tag::Dp]),
    ("Minimum Spanning Tree", "Prim’s vs Kruskal’s algorithm.", &[Tag::Graph]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_seed_is_tagged_and_described() {
        for (title, description, tags) in SEED_QUESTIONS {
            assert!(!title.trim().is_empty());
            assert!(!description.trim().is_empty());
            assert!(!tags.is_empty(), "{} has no tags", title);
        }
    }

    #[test]
    fn test_dp_seed_count() {
        let dp = SEED_QUESTIONS.iter().filter(|(_, _, tags)| tags.contains(&Tag::Dp)).count();
        assert_eq!(dp, 4);
    }
}
