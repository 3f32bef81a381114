use crate::SyntaxNode;

pub struct Preorder {
    start: SyntaxNode,
    next: Option<WalkEvent>,
    skip_subtree: bool,
}

impl Preorder {
    pub fn new(start: SyntaxNode) -> Self {
        let next = Some(WalkEvent::Enter(start.clone()));
        Self { start, next, skip_subtree: false }
    }

    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }
}

impl Iterator for Preorder {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.skip_subtree {
            self.next = self.next.take().and_then(|next| match next {
                WalkEvent::Enter(first_child) => first_child.parent().map(WalkEvent::Leave),
                WalkEvent::Leave(parent) => Some(WalkEvent::Leave(parent)),
            });
            self.skip_subtree = false;
        }

        let next = self.next.take();

        self.next = next.as_ref().and_then(|event| {
            Some(match event {
                WalkEvent::Enter(node) => match node.first_child() {
                    Some(child) => WalkEvent::Enter(child),
                    None => WalkEvent::Leave(node.clone()),
                },
                WalkEvent::Leave(node) => {
                    if node == &self.start {
                        return None;
                    }

                    match node.next_sibling() {
                        Some(sibling) => WalkEvent::Enter(sibling),
                        None => WalkEvent::Leave(node.parent()?),
                    }
                }
            })
        });

        next
    }
}

#[derive(Debug, Clone)]
pub enum WalkEvent {
    Enter(SyntaxNode),
    Leave(SyntaxNode),
}
