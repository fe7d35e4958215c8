use std::collections::HashSet;

use super::{BodyRegistry, Tool, ToolSelector};
use crate::{
    core::{math::Vector2, traits::Real},
    slicer::{slice_all, SliceOptions, SliceReport},
    world::{BodyDesc, BodyKind, BodyLifecycle, RegionQuery, SpatialQuery},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Runs the selected tool.
    Primary,
    /// Deletes bodies inside the dragged rectangle.
    Secondary,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent<T = f64> {
    Pressed {
        button: PointerButton,
        position: Vector2<T>,
    },
    Released {
        button: PointerButton,
        position: Vector2<T>,
    },
    Moved {
        position: Vector2<T>,
    },
}

/// Drag in progress, if any.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum InputState<T = f64> {
    #[default]
    Idle,
    UsingTool {
        start: Vector2<T>,
    },
    Deleting {
        start: Vector2<T>,
    },
}

/// What a pointer event did to the world.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerAction<H, T = f64> {
    /// Nothing happened.
    None,
    /// A primary drag started with this tool.
    ToolStarted(Tool),
    /// A secondary drag started.
    DeleteStarted,
    /// Slice tool finished.
    Sliced(SliceReport<H, T>),
    /// Draw tool finished and spawned a body.
    Spawned(H),
    /// Secondary drag finished, these bodies were destroyed.
    Deleted(Vec<H>),
    /// Tool finished without effect (cut hit nothing, shape too small or overlapping a body).
    Rejected(Tool),
}

/// Turns pointer drags into slicing, spawning and deleting.
#[derive(Debug, Clone)]
pub struct Controller<T>
where
    T: Real,
{
    state: InputState<T>,
    tools: ToolSelector,
    registry: BodyRegistry<T>,
    options: SliceOptions<T>,
}

impl<T> Controller<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self::with_options(SliceOptions::new())
    }

    pub fn with_options(options: SliceOptions<T>) -> Self {
        Self {
            state: InputState::Idle,
            tools: ToolSelector::new(),
            registry: BodyRegistry::with_default_kinds(),
            options,
        }
    }

    #[inline]
    pub fn state(&self) -> InputState<T> {
        self.state
    }

    #[inline]
    pub fn tools(&self) -> &ToolSelector {
        &self.tools
    }

    #[inline]
    pub fn tools_mut(&mut self) -> &mut ToolSelector {
        &mut self.tools
    }

    #[inline]
    pub fn registry_mut(&mut self) -> &mut BodyRegistry<T> {
        &mut self.registry
    }

    #[inline]
    pub fn options(&self) -> &SliceOptions<T> {
        &self.options
    }

    /// Advance the input state machine with `event`, running the finished action on `world`.
    ///
    /// The tool selection is locked for the duration of a drag. Drawn shapes are rejected when
    /// their outline overlaps or touches a body, and deleting removes the bodies whose outline
    /// overlaps the dragged rectangle.
    pub fn handle_event<W>(
        &mut self,
        world: &mut W,
        event: PointerEvent<T>,
    ) -> ControllerAction<<W as SpatialQuery<T>>::Handle, T>
    where
        W: BodyLifecycle<T> + RegionQuery<T>,
    {
        use PointerButton::*;
        use PointerEvent::*;

        let (button, position) = match event {
            Pressed { button, position } => (button, position),
            Released { button, position } => (button, position),
            Moved { .. } => return ControllerAction::None,
        };
        let pressed = matches!(event, Pressed { .. });

        match (self.state, button) {
            (InputState::Idle, Primary) if pressed => {
                self.state = InputState::UsingTool { start: position };
                self.tools.lock();
                ControllerAction::ToolStarted(self.tools.selected())
            }
            (InputState::Idle, Secondary) if pressed => {
                self.state = InputState::Deleting { start: position };
                self.tools.lock();
                ControllerAction::DeleteStarted
            }
            (InputState::UsingTool { start }, Primary) => {
                self.finish();
                self.run_tool(world, start, position)
            }
            (InputState::Deleting { start }, Secondary) => {
                self.finish();
                let handles = world.bodies_in_region(start, position);
                for &h in handles.iter() {
                    world.destroy(h);
                }
                log::debug!("deleted {} bodies", handles.len());
                ControllerAction::Deleted(handles)
            }
            _ => ControllerAction::None,
        }
    }

    fn finish(&mut self) {
        self.state = InputState::Idle;
        self.tools.unlock();
    }

    fn run_tool<W>(
        &mut self,
        world: &mut W,
        start: Vector2<T>,
        end: Vector2<T>,
    ) -> ControllerAction<<W as SpatialQuery<T>>::Handle, T>
    where
        W: BodyLifecycle<T> + RegionQuery<T>,
    {
        let tool = self.tools.selected();
        let diff = end - start;
        let center = start + diff / T::two();
        let minimum_area = self.options.minimum_area;

        match tool {
            Tool::Slice => {
                if world.cast_ray(start, end, &HashSet::new()).is_none() {
                    return ControllerAction::Rejected(tool);
                }
                ControllerAction::Sliced(slice_all(world, start, end, &self.options))
            }
            Tool::DrawRectangle => {
                if (diff.x * diff.y).abs() <= minimum_area {
                    return ControllerAction::Rejected(tool);
                }
                self.spawn_shape(world, tool, BodyKind::Rectangle, diff / T::two(), center)
            }
            Tool::DrawCircle => {
                let radius = num_traits::real::Real::max(diff.x.abs(), diff.y.abs()) / T::two();
                if T::pi() * radius * radius <= minimum_area {
                    return ControllerAction::Rejected(tool);
                }
                let size = Vector2::new(radius, radius);
                self.spawn_shape(world, tool, BodyKind::Circle, size, center)
            }
        }
    }

    /// Spawn a `kind` body at `position` unless its outline overlaps an existing body.
    fn spawn_shape<W>(
        &self,
        world: &mut W,
        tool: Tool,
        kind: BodyKind,
        size: Vector2<T>,
        position: Vector2<T>,
    ) -> ControllerAction<<W as SpatialQuery<T>>::Handle, T>
    where
        W: BodyLifecycle<T> + RegionQuery<T>,
    {
        let polygon = match self.registry.create(kind, size) {
            Ok(polygon) => polygon,
            Err(e) => {
                log::warn!("{e}");
                return ControllerAction::Rejected(tool);
            }
        };

        let blocking = world.bodies_overlapping(&polygon.translated(position));
        if !blocking.is_empty() {
            log::debug!("{kind:?} at {position:?} overlaps {blocking:?}");
            return ControllerAction::Rejected(tool);
        }

        let handle = world.spawn(BodyDesc::new(kind, polygon).with_position(position));
        log::debug!("spawned {kind:?} {handle:?} at {position:?}");
        ControllerAction::Spawned(handle)
    }
}

impl<T> Default for Controller<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}
