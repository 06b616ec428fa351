use crate::core::components::BallColor;
use crate::rendering::palette::palette::color_for;
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct BallMaterialsInitSet;

/// One shared material per palette color, indexed by `BallColor::index`.
#[derive(Resource)]
pub struct BallDisplayMaterials(pub Vec<Handle<ColorMaterial>>);
impl BallDisplayMaterials {
    pub fn get(&self, color: BallColor) -> Option<&Handle<ColorMaterial>> {
        self.0.get(color.index())
    }
}

/// Unit circle scaled per ball through the child transform.
#[derive(Resource)]
pub struct CircleMesh(pub Handle<Mesh>);

pub struct MaterialsPlugin;
impl Plugin for MaterialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_ball_materials.in_set(BallMaterialsInitSet));
    }
}
fn setup_ball_materials(
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut commands: Commands,
) {
    let display_handles = BallColor::ALL
        .iter()
        .map(|c| materials.add(color_for(*c)))
        .collect();
    commands.insert_resource(BallDisplayMaterials(display_handles));
    commands.insert_resource(CircleMesh(meshes.add(Circle { radius: 0.5 })));
}
