//! Two-click hinge and spring creation

use glam::DVec2;

use super::{JointDraft, Tool};
use crate::error::EditorError;
use crate::state::{AppState, Notice};

impl AppState {
    pub(super) fn joint_press(&mut self, world: DVec2) {
        let Some(kind) = self.interaction.tool.joint_kind() else {
            return;
        };
        let hit = self.scene.world.point_query_nearest(world);

        let Some(draft) = self.interaction.joint_draft else {
            let Some(body) = hit else {
                self.set_tool(Tool::None);
                self.notify(Notice::warning("No object found for the first anchor."));
                return;
            };
            self.interaction.joint_draft = Some(JointDraft {
                body,
                anchor: world,
            });
            self.selection.select(body);
            self.refresh_panel();
            if !self.interaction.joint_message_shown {
                self.interaction.joint_message_shown = true;
                self.notify(Notice::info(
                    "Joint Creation",
                    "First object selected. Click on the second to create the joint.",
                ));
            }
            return;
        };

        let Some(second) = hit else {
            self.notify(Notice::warning("A second object is needed to create the joint."));
            return;
        };
        if second == draft.body {
            self.notify(Notice::warning("Select a different object for the second anchor."));
            return;
        }

        match self
            .scene
            .create_joint(kind, draft.body, second, draft.anchor, world)
        {
            Ok(_) => {
                self.set_tool(Tool::None);
                self.selection.clear();
                self.refresh_panel();
                self.notify(Notice::info(
                    "Joint Creation",
                    format!("{} created.", kind.label()),
                ));
            }
            Err(e) => {
                // first body is gone, start over
                if matches!(e, EditorError::Reference(_)) {
                    self.interaction.joint_draft = None;
                }
                self.report(&e);
            }
        }
    }
}
